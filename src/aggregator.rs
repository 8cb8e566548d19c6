//! Concurrent refresh across every configured source.
//!
//! One fetch per source is started at once and all of them are awaited; a
//! slow or failing source never cancels its siblings. The per-source results
//! are then concatenated in registry order and sorted newest first, with
//! undated items after every dated one.
//!
//! All state lives inside a single call, so overlapping refreshes cannot
//! interfere with each other.

use std::time::{Duration, Instant};

use futures::future::join_all;
use itertools::Itertools;
use tracing::{info, instrument, warn};

use crate::feeds::fetcher::{fetch_feed, FetchDocument};
use crate::models::{ExtractedItem, FeedSource, RefreshOutcome};

/// Merge per-source results into one list, newest first.
///
/// The sort is stable: items without a timestamp keep their relative order
/// and end up after all dated items.
pub fn merge_items(per_source: Vec<Vec<ExtractedItem>>) -> Vec<ExtractedItem> {
    per_source
        .into_iter()
        .flatten()
        .sorted_by(|a, b| b.published_at.cmp(&a.published_at))
        .collect()
}

/// Fetch every source concurrently and merge the results.
///
/// `deadline` applies to each source separately. The outcome is marked
/// failed only when every source came back empty.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn refresh<F>(fetcher: &F, sources: &[FeedSource], deadline: Duration) -> RefreshOutcome
where
    F: FetchDocument,
{
    let t0 = Instant::now();

    let per_source: Vec<Vec<ExtractedItem>> = join_all(
        sources
            .iter()
            .map(|source| fetch_feed(fetcher, source, deadline)),
    )
    .await;

    for (source, items) in sources.iter().zip(&per_source) {
        info!(source = %source.tag, count = items.len(), "Source finished");
    }

    let all_empty = per_source.iter().all(Vec::is_empty);
    let items = merge_items(per_source);
    let failed = items.is_empty() && all_empty;

    if failed {
        warn!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "No source produced any items"
        );
    } else {
        info!(
            total = items.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Refresh complete"
        );
    }

    RefreshOutcome { items, failed }
}
