use anyhow::Result;

use feedsync_core::storage::{Database, SourceRepository};

pub async fn run(db: &Database) -> Result<()> {
    let registry = SourceRepository::new(db);
    let sources = registry.list_all().await?;

    if sources.is_empty() {
        println!("No feed sources configured.");
        return Ok(());
    }

    println!("Sources ({}):\n", sources.len());

    for source in &sources {
        let summarize = if source.summarize { " [summarize]" } else { "" };
        println!("  {:>4}  {}{}", source.id, source.url, summarize);
    }

    Ok(())
}
