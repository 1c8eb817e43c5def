use futures::future::join_all;

use super::models::Topic;
use crate::host::{Collection, ObjectStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicMarkup {
    Name,
    /// An anchor linking to the topic's page
    Anchor,
}

impl TopicMarkup {
    fn render(&self, topic: &Topic) -> String {
        match self {
            TopicMarkup::Name => topic.name.clone(),
            TopicMarkup::Anchor => format!(r#"<a href="/topic/{}">{}</a>"#, topic.id, topic.name),
        }
    }
}

async fn load_topic(store: &dyn ObjectStore, topic_id: &str) -> Option<Topic> {
    match store.load_by_id(topic_id, Collection::Topic).await {
        Ok(Some(record)) => Topic::from_record(record)
            .inspect_err(|err| tracing::warn!("Ignoring malformed topic {}: {}", topic_id, err))
            .ok(),
        Ok(None) => None,
        Err(err) => {
            tracing::warn!("Failed to load topic {}: {}", topic_id, err);
            None
        }
    }
}

/// Load every referenced topic concurrently and render them in the
/// order they were referenced. Topics that can't be loaded are
/// skipped.
pub async fn resolve_topics(
    store: &dyn ObjectStore,
    topic_refs: &[String],
    markup: TopicMarkup,
) -> Vec<String> {
    let expected = topic_refs.len();
    let loaded = join_all(topic_refs.iter().map(|id| load_topic(store, id))).await;
    debug_assert_eq!(loaded.len(), expected);

    let rendered: Vec<String> = loaded
        .iter()
        .flatten()
        .map(|topic| markup.render(topic))
        .collect();

    if rendered.len() < expected {
        tracing::debug!("Resolved {} of {} topics", rendered.len(), expected);
    }
    rendered
}
