use chrono::{DateTime, Utc};
use feed_rs::parser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Bytes are not a well-formed RSS/Atom document
    #[error("Malformed feed: {0}")]
    Malformed(#[from] feed_rs::parser::ParseFeedError),
    /// Document parsed but carried no entries
    #[error("Feed contains no entries")]
    Empty,
}

/// One item of the observation feed.
///
/// Both text blocks are optional here; deciding whether an entry is usable is
/// left to the reading parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// Parses a feed document into its entries, in document order.
///
/// The ARSO feed publishes the current observation first, so callers take
/// index 0.
pub fn parse_document(bytes: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let feed = parser::parse(bytes)?;

    let entries: Vec<FeedEntry> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));

            FeedEntry {
                title: entry.title.map(|t| t.content),
                summary,
                published: entry.published.or(entry.updated),
            }
        })
        .collect();

    if entries.is_empty() {
        return Err(FeedError::Empty);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rss_entries_in_document_order() {
        let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
    <title>ARSO</title>
    <item>
        <title>LJUBLJANA: Jasno, 18°C</title>
        <description>Vidnost: 10 km</description>
        <pubDate>Sun, 18 Oct 2026 14:00:00 +0000</pubDate>
    </item>
    <item>
        <title>LJUBLJANA: Oblačno, 15°C</title>
        <description>Vidnost: 8 km</description>
    </item>
</channel></rss>"#;

        let entries = parse_document(rss.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("LJUBLJANA: Jasno, 18°C"));
        assert_eq!(entries[0].summary.as_deref(), Some("Vidnost: 10 km"));
        assert!(entries[0].published.is_some());
        assert_eq!(entries[1].title.as_deref(), Some("LJUBLJANA: Oblačno, 15°C"));
        assert!(entries[1].published.is_none());
    }

    #[test]
    fn test_item_without_description_has_no_summary() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item><title>LJUBLJANA: Jasno, 18°C</title></item>
</channel></rss>"#;

        let entries = parse_document(rss.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].summary.is_none());
    }

    #[test]
    fn test_atom_summary_is_used() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>ARSO</title>
    <id>urn:arso</id>
    <updated>2026-10-18T14:00:00Z</updated>
    <entry>
        <title>LJUBLJANA: Jasno, 18°C</title>
        <id>urn:arso:1</id>
        <updated>2026-10-18T14:00:00Z</updated>
        <summary>Vlažnost zraka: 60%</summary>
    </entry>
</feed>"#;

        let entries = parse_document(atom.as_bytes()).unwrap();
        assert_eq!(entries[0].summary.as_deref(), Some("Vlažnost zraka: 60%"));
        assert!(entries[0].published.is_some());
    }

    #[test]
    fn test_empty_channel_is_error() {
        let empty_rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel></channel></rss>"#;

        assert!(matches!(
            parse_document(empty_rss.as_bytes()),
            Err(FeedError::Empty)
        ));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        assert!(matches!(
            parse_document(b"<not valid xml"),
            Err(FeedError::Malformed(_))
        ));
    }
}
