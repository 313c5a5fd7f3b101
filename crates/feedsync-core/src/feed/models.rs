use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured feed origin to poll
///
/// Sources are created and updated externally; a run takes a read-only
/// snapshot of them once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub id: i64,
    pub url: String,
    /// Consumed by downstream summarization, not by sync logic
    pub summarize: bool,
}

/// A candidate article extracted in the current run, not yet checked
/// against stored state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArticle {
    pub source_id: i64,
    pub title: String,
    pub link: String,
    pub description: String,
    /// Feed-provided publish time, or the extraction time when the
    /// feed carries none
    pub published_at: DateTime<Utc>,
}

/// A persisted article row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub source_id: i64,
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    /// Filled in by downstream processing for sources with the
    /// summarize flag set
    pub summary: Option<String>,
}
