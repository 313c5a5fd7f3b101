mod fetcher;
mod inspect;
mod models;
mod parser;

pub use fetcher::{ExtractFeed, FeedFetcher};
pub use inspect::{FeedSnapshot, InspectItem, InspectOutcome};
pub use models::{Article, FeedSource, NewArticle};
pub use parser::{parse_feed, ParsedFeed, ParsedItem};
