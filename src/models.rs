//! Data models for feed sources and the items extracted from them.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`SourceTag`]: Enumerated identity of a news outlet
//! - [`FeedSource`]: One configured feed endpoint and its tag
//! - [`ExtractedItem`]: A normalized entry ready for display
//! - [`RefreshOutcome`]: The merged result of one refresh across all sources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Message shown to readers when no source produced anything.
pub const TOTAL_FAILURE_MESSAGE: &str =
    "No articles could be loaded. Check your connection and try again.";

/// The outlet a feed belongs to.
///
/// Serialized in snake_case (`valley_news`) so it can be written in YAML
/// source lists; displayed with the outlet's own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    ValleyNews,
    Patch,
    PressEnterprise,
}

impl SourceTag {
    /// Every known outlet, in registry order.
    pub const ALL: [SourceTag; 3] = [
        SourceTag::ValleyNews,
        SourceTag::Patch,
        SourceTag::PressEnterprise,
    ];

    /// Human-readable outlet name.
    pub fn display_name(self) -> &'static str {
        match self {
            SourceTag::ValleyNews => "Valley News",
            SourceTag::Patch => "Patch",
            SourceTag::PressEnterprise => "Press-Enterprise",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One configured syndication endpoint.
///
/// Built once at startup and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedSource {
    /// The feed URL to fetch.
    pub endpoint: Url,
    /// Which outlet the feed belongs to.
    pub tag: SourceTag,
}

impl FeedSource {
    pub fn new(endpoint: Url, tag: SourceTag) -> Self {
        Self { endpoint, tag }
    }
}

/// A single feed entry after sanitizing and date normalization.
///
/// Only built when both `title` and `link` are non-empty; every other field
/// is best-effort.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractedItem {
    /// Fresh random identity, distinct for every extraction.
    pub id: Uuid,
    /// Plain-text headline.
    pub title: String,
    /// Link to the full article.
    pub link: String,
    /// Plain-text summary, possibly empty.
    pub description: String,
    /// Publication instant, absent when no known date format matched.
    pub published_at: Option<DateTime<Utc>>,
    /// Image URL from an enclosure or media element.
    pub image_url: Option<String>,
    /// The outlet this item came from.
    pub source: SourceTag,
}

impl ExtractedItem {
    /// Build an item, returning `None` when `title` or `link` is empty.
    pub fn new(
        title: String,
        link: String,
        description: String,
        published_at: Option<DateTime<Utc>>,
        image_url: Option<String>,
        source: SourceTag,
    ) -> Option<Self> {
        if title.is_empty() || link.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            title,
            link,
            description,
            published_at,
            image_url,
            source,
        })
    }
}

/// The merged, sorted result of one refresh.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefreshOutcome {
    /// Items from every source, newest first, undated last.
    pub items: Vec<ExtractedItem>,
    /// `true` only when every source came back empty.
    pub failed: bool,
}

impl RefreshOutcome {
    /// The message to show instead of the list, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        self.failed.then_some(TOTAL_FAILURE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_item_requires_title_and_link() {
        let missing_title = ExtractedItem::new(
            String::new(),
            "https://example.com/a".to_string(),
            String::new(),
            None,
            None,
            SourceTag::Patch,
        );
        assert!(missing_title.is_none());

        let missing_link = ExtractedItem::new(
            "Headline".to_string(),
            String::new(),
            String::new(),
            None,
            None,
            SourceTag::Patch,
        );
        assert!(missing_link.is_none());
    }

    #[test]
    fn test_items_get_distinct_ids() {
        let make = || {
            ExtractedItem::new(
                "Same".to_string(),
                "https://example.com/same".to_string(),
                String::new(),
                None,
                None,
                SourceTag::ValleyNews,
            )
            .unwrap()
        };
        assert_ne!(make().id, make().id);
    }

    #[test]
    fn test_source_tag_display_names() {
        assert_eq!(SourceTag::ValleyNews.to_string(), "Valley News");
        assert_eq!(SourceTag::Patch.to_string(), "Patch");
        assert_eq!(SourceTag::PressEnterprise.to_string(), "Press-Enterprise");
    }

    #[test]
    fn test_source_tag_serializes_snake_case() {
        let json = serde_json::to_string(&SourceTag::PressEnterprise).unwrap();
        assert_eq!(json, "\"press_enterprise\"");
        let tag: SourceTag = serde_json::from_str("\"valley_news\"").unwrap();
        assert_eq!(tag, SourceTag::ValleyNews);
    }

    #[test]
    fn test_refresh_outcome_serialization() {
        let item = ExtractedItem::new(
            "Council approves budget".to_string(),
            "https://example.com/budget".to_string(),
            "The vote was 4-1.".to_string(),
            Some(Utc.with_ymd_and_hms(2026, 2, 21, 18, 0, 0).unwrap()),
            None,
            SourceTag::Patch,
        )
        .unwrap();
        let outcome = RefreshOutcome {
            items: vec![item],
            failed: false,
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("Council approves budget"));
        assert!(json.contains("\"source\":\"patch\""));
        assert!(json.contains("2026-02-21T18:00:00Z"));
    }

    #[test]
    fn test_error_message_only_when_failed() {
        let ok = RefreshOutcome::default();
        assert_eq!(ok.error_message(), None);

        let failed = RefreshOutcome {
            items: vec![],
            failed: true,
        };
        assert_eq!(failed.error_message(), Some(TOTAL_FAILURE_MESSAGE));
    }
}
