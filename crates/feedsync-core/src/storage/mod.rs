mod article_repo;
mod database;
mod source_repo;

pub use article_repo::ArticleRepository;
pub use database::Database;
pub use source_repo::SourceRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::feed::{FeedSource, NewArticle};
use crate::Result;

/// Read-only registry of configured feed sources
#[async_trait]
pub trait SourceStore: Send + Sync {
    async fn list_sources(&self) -> Result<Vec<FeedSource>>;
}

/// Article persistence: cutoff lookup plus per-source batch insert
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Latest persisted publish time for a source, or `None` when no
    /// article was ever persisted for it
    async fn latest_published_at(&self, source_id: i64) -> Result<Option<DateTime<Utc>>>;

    /// Insert one source's admitted articles as a single batch
    async fn insert_batch(&self, source_id: i64, articles: &[NewArticle]) -> Result<()>;
}
