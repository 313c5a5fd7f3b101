use async_trait::async_trait;
use sqlx::FromRow;

use super::{Database, SourceStore};
use crate::feed::FeedSource;
use crate::Result;

/// Read-only access to the feed source registry
#[derive(Clone)]
pub struct SourceRepository {
    db: Database,
}

#[derive(FromRow)]
struct SourceRow {
    id: i64,
    url: String,
    summarize: bool,
}

impl From<SourceRow> for FeedSource {
    fn from(row: SourceRow) -> Self {
        FeedSource {
            id: row.id,
            url: row.url,
            summarize: row.summarize,
        }
    }
}

impl SourceRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Snapshot of all configured sources
    pub async fn list_all(&self) -> Result<Vec<FeedSource>> {
        let rows: Vec<SourceRow> = sqlx::query_as(
            r#"
            SELECT id, url, summarize
            FROM rss_feeds
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(FeedSource::from).collect())
    }
}

#[async_trait]
impl SourceStore for SourceRepository {
    async fn list_sources(&self) -> Result<Vec<FeedSource>> {
        self.list_all().await
    }
}
