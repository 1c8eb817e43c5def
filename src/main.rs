use anyhow::Result;
use calendar::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
