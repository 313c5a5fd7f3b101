use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use super::{ArticleStore, Database};
use crate::feed::NewArticle;
use crate::Result;

/// Article persistence keyed by owning source
#[derive(Clone)]
pub struct ArticleRepository {
    db: Database,
}

impl ArticleRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Latest persisted publish time for one source: the admission
    /// cutoff for its candidates
    pub async fn latest_published_at(&self, source_id: i64) -> Result<Option<DateTime<Utc>>> {
        let row: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MAX(published_at) FROM articles WHERE rss_id = $1")
                .bind(source_id)
                .fetch_one(self.db.pool())
                .await?;

        Ok(row.0)
    }

    /// Insert one source's articles as a single multi-row statement
    pub async fn insert_batch(&self, source_id: i64, articles: &[NewArticle]) -> Result<()> {
        if articles.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO articles (rss_id, title, link, description, published_at) ",
        );

        builder.push_values(articles, |mut row, article| {
            row.push_bind(source_id)
                .push_bind(article.title.as_str())
                .push_bind(article.link.as_str())
                .push_bind(article.description.as_str())
                .push_bind(article.published_at);
        });

        builder.build().execute(self.db.pool()).await?;

        Ok(())
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn latest_published_at(&self, source_id: i64) -> Result<Option<DateTime<Utc>>> {
        ArticleRepository::latest_published_at(self, source_id).await
    }

    async fn insert_batch(&self, source_id: i64, articles: &[NewArticle]) -> Result<()> {
        ArticleRepository::insert_batch(self, source_id, articles).await
    }
}
