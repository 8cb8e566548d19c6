//! Feed retrieval and entry extraction.
//!
//! Each configured source goes through the same two steps:
//!
//! 1. **Fetching** ([`fetcher`]): one HTTP GET of the feed document, bounded
//!    by a per-source deadline
//! 2. **Extraction** ([`extractor`]): a streaming pass over the XML that
//!    rebuilds entries and normalizes them into [`ExtractedItem`]s
//!
//! # Supported formats
//!
//! | Format | Entry element | Link | Date elements |
//! |--------|---------------|------|---------------|
//! | RSS 2.0 | `<item>` | `<link>` text | `<pubDate>`, `<dc:date>` |
//! | Atom | `<entry>` | `<link href>` | `<published>`, `<updated>` |
//!
//! Failures are contained per source: a broken feed contributes no items and
//! never affects the others.
//!
//! [`ExtractedItem`]: crate::models::ExtractedItem

pub mod extractor;
pub mod fetcher;
