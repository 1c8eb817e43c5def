//! Template loading and page rendering. Templates use caret delimited
//! tokens (`^name^`). Page rendering resolves tokens against local
//! values first and then against registered global helpers.
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use anyhow::{Error, Result};
use async_trait::async_trait;
use futures::future::join_all;
use regex::{Captures, Regex};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^([A-Za-z0-9_]+)\^").expect("Invalid token pattern"));

const TEMPLATE_EXTENSION: &str = "html";

/// Replace every `^token^` in `template` in a single pass. Tokens
/// for which `lookup` returns `None` are left verbatim. Replacement
/// values are inserted literally and never scanned for more tokens.
pub fn replace_tokens<F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    TOKEN
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Distinct token names in order of first appearance.
pub fn tokens(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TOKEN
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// A named function invoked during page rendering to produce dynamic
/// content. Called with the token name that triggered it.
#[async_trait]
pub trait GlobalHelper: Send + Sync {
    async fn render(&self, flag: &str) -> Result<String, Error>;
}

/// Reads templates from the configured templates directory.
#[derive(Clone, Debug)]
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    pub fn new(templates_path: &str) -> Self {
        Self {
            templates_path: PathBuf::from(templates_path),
        }
    }

    /// Load a template by name, e.g. `elements/event`, from
    /// `{templates_path}/{name}.html`. Returns `None` when no such
    /// file exists.
    pub async fn load(&self, name: &str) -> Result<Option<String>, Error> {
        let path = self.templates_path.join(format!(
            "{}.{}",
            name.trim_start_matches('/'),
            TEMPLATE_EXTENSION
        ));

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

pub struct TemplateService {
    loader: TemplateLoader,
    globals: HashMap<String, Arc<dyn GlobalHelper>>,
}

impl TemplateService {
    pub fn new(loader: TemplateLoader) -> Self {
        Self {
            loader,
            globals: HashMap::new(),
        }
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    pub fn register_global(&mut self, name: &str, helper: Arc<dyn GlobalHelper>) {
        if self.globals.insert(name.to_string(), helper).is_some() {
            tracing::warn!("Replaced existing global template helper {}", name);
        }
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    /// Render a template string. Global helpers referenced by the
    /// template run concurrently; a failing helper is logged and
    /// rendered as an empty string.
    pub async fn render(&self, template: &str, locals: &HashMap<String, String>) -> String {
        let pending = tokens(template)
            .into_iter()
            .filter(|name| !locals.contains_key(name))
            .filter_map(|name| {
                self.globals
                    .get(&name)
                    .map(|helper| (name, Arc::clone(helper)))
            })
            .map(|(name, helper)| async move {
                let value = match helper.render(&name).await {
                    Ok(value) => value,
                    Err(err) => {
                        tracing::error!("Template helper {} failed: {}", name, err);
                        String::new()
                    }
                };
                (name, value)
            });
        let globals: HashMap<String, String> = join_all(pending).await.into_iter().collect();

        replace_tokens(template, |name| {
            locals.get(name).or_else(|| globals.get(name)).cloned()
        })
    }
}
