use chrono::{DateTime, Utc};
use feed_rs::parser;

use crate::{Error, Result};

/// Parsed feed data from RSS/Atom content
#[derive(Debug)]
pub struct ParsedFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<ParsedItem>,
}

/// One normalized feed entry, not yet bound to a source
#[derive(Debug, Clone)]
pub struct ParsedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// Parse RSS/Atom feed content into structured data.
///
/// Text fields are copied verbatim; absent elements map to empty
/// strings. An entry without a publish date gets the extraction time,
/// so undated items always rank as the newest seen so far for their
/// source. A feed with zero entries is a valid, non-error outcome.
pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let title = feed.title.map(|t| t.content).unwrap_or_default();
    let link = feed.links.first().map(|l| l.href.clone()).unwrap_or_default();
    let description = feed.description.map(|d| d.content).unwrap_or_default();

    let extracted_at = Utc::now();

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let link = entry.links.first().map(|l| l.href.clone()).unwrap_or_default();

            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            let published_at = entry.published.or(entry.updated).unwrap_or(extracted_at);

            ParsedItem {
                title,
                link,
                description,
                published_at,
            }
        })
        .collect();

    Ok(ParsedFeed {
        title,
        link,
        description,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <link>https://example.com</link>
    <description>Posts about examples</description>
    <item>
      <title>First post</title>
      <link>https://example.com/first</link>
      <description>Hello world</description>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second post</title>
      <link>https://example.com/second</link>
      <description>More content</description>
      <pubDate>Tue, 02 Jan 2024 09:30:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_channel_metadata_and_items() {
        let parsed = parse_feed(SAMPLE_RSS.as_bytes()).unwrap();

        assert_eq!(parsed.title, "Example Blog");
        assert_eq!(parsed.link, "https://example.com");
        assert_eq!(parsed.description, "Posts about examples");
        assert_eq!(parsed.items.len(), 2);

        let first = &parsed.items[0];
        assert_eq!(first.title, "First post");
        assert_eq!(first.link, "https://example.com/first");
        assert_eq!(first.description, "Hello world");
        assert_eq!(
            first.published_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn undated_items_default_to_extraction_time() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>No dates</title>
    <item><title>a</title><link>https://example.com/a</link></item>
    <item><title>b</title><link>https://example.com/b</link></item>
  </channel>
</rss>"#;

        let before = Utc::now();
        let parsed = parse_feed(xml.as_bytes()).unwrap();
        let after = Utc::now();

        assert_eq!(parsed.items.len(), 2);
        for item in &parsed.items {
            assert!(item.published_at >= before);
            assert!(item.published_at <= after);
        }
    }

    #[test]
    fn empty_feed_is_not_an_error() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Quiet feed</title>
    <link>https://example.com</link>
  </channel>
</rss>"#;

        let parsed = parse_feed(xml.as_bytes()).unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn missing_fields_map_to_empty_strings() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Sparse</title>
    <item><pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate></item>
  </channel>
</rss>"#;

        let parsed = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].title, "");
        assert_eq!(parsed.items[0].link, "");
        assert_eq!(parsed.items[0].description, "");
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_feed(b"this is not xml at all").unwrap_err();
        assert!(matches!(err, Error::FeedParse(_)));
    }
}
