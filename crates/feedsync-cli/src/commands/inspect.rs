use anyhow::Result;

use feedsync_core::{
    feed::{FeedFetcher, InspectOutcome},
    AppConfig,
};

pub async fn run(config: &AppConfig, url: &str) -> Result<()> {
    let fetcher = FeedFetcher::new(config)?;

    let outcome = InspectOutcome::from_fetch(fetcher.fetch(url).await);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
