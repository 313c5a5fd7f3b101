use std::sync::Arc;

use anyhow::Result;

use feedsync_core::{
    feed::FeedFetcher,
    storage::{ArticleRepository, Database, SourceRepository},
    sync::run_sync,
    AppConfig,
};

pub async fn run(db: &Database, config: &AppConfig) -> Result<()> {
    let extractor = Arc::new(FeedFetcher::new(config)?);
    let registry = SourceRepository::new(db);
    let store = Arc::new(ArticleRepository::new(db));

    let report = run_sync(extractor, &registry, store, config.sync.concurrency).await?;

    for failure in &report.failures {
        eprintln!(
            "source {}: {} failed: {}",
            failure.source_id, failure.stage, failure.error
        );
    }

    if report.is_partial() {
        println!(
            "Sync complete with partial failures. {} new articles persisted, {} sources failed.",
            report.new_articles,
            report.failures.len()
        );
    } else {
        println!(
            "Sync complete. {} new articles persisted.",
            report.new_articles
        );
    }

    Ok(())
}
