//! # Town Green News
//!
//! Fetches several independently-run local news feeds at once, normalizes
//! their entries, and merges them into a single newest-first list.
//!
//! ## Pipeline
//!
//! 1. **Sources**: a fixed registry of feed endpoints ([`sources`])
//! 2. **Fetching**: one concurrent HTTP request per source ([`feeds::fetcher`])
//! 3. **Extraction**: streaming RSS/Atom parsing into canonical items
//!    ([`feeds::extractor`]), with timestamp normalization ([`dates`]) and
//!    markup stripping ([`utils::clean_text`])
//! 4. **Merging**: sort by publish time and decide whether anything loaded
//!    ([`aggregator`])
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use town_green_news::aggregator::refresh;
//! use town_green_news::feeds::fetcher::HttpFetcher;
//! use town_green_news::sources::default_sources;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(Duration::from_secs(15))?;
//! let outcome = refresh(&fetcher, &default_sources(), Duration::from_secs(15)).await;
//! for item in &outcome.items {
//!     println!("{} ({})", item.title, item.source);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod dates;
pub mod error;
pub mod feeds;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod utils;
