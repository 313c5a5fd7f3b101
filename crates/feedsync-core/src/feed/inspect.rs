use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::parser::{ParsedFeed, ParsedItem};
use crate::Result;

/// Payload of a successful single-feed inspection
#[derive(Debug)]
pub struct FeedSnapshot {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<InspectItem>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// Outcome of inspecting one feed URL.
///
/// Serializes to the `{success, data | error}` envelope: the success
/// variant carries the typed snapshot under `data`, the failure
/// variant a human-readable message under `error`.
#[derive(Debug)]
pub enum InspectOutcome {
    Success(FeedSnapshot),
    Failure(String),
}

impl InspectOutcome {
    pub fn from_fetch(result: Result<ParsedFeed>) -> Self {
        match result {
            Ok(parsed) => InspectOutcome::Success(parsed.into()),
            Err(err) => InspectOutcome::Failure(err.to_string()),
        }
    }
}

impl From<ParsedFeed> for FeedSnapshot {
    fn from(parsed: ParsedFeed) -> Self {
        FeedSnapshot {
            title: parsed.title,
            link: parsed.link,
            description: parsed.description,
            items: parsed.items.into_iter().map(InspectItem::from).collect(),
        }
    }
}

impl From<ParsedItem> for InspectItem {
    fn from(item: ParsedItem) -> Self {
        InspectItem {
            title: item.title,
            link: item.link,
            description: item.description,
            published_at: item.published_at,
        }
    }
}

impl Serialize for InspectOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InspectOutcome", 2)?;
        match self {
            InspectOutcome::Success(snapshot) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", snapshot)?;
            }
            InspectOutcome::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}

impl Serialize for FeedSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FeedSnapshot", 5)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("link", &self.link)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("itemCount", &self.items.len())?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}
