//! Utility functions for text cleanup, log formatting, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Markup and entity stripping for feed text
//! - Display formatting for publish dates
//! - String truncation for logging
//! - File system validation for output directories

use chrono::{DateTime, Local, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[^&;\s]+;").unwrap());

/// Strip markup and entity references from feed text.
///
/// Every `<...>` span is replaced by a single space, then every `&name;`
/// reference likewise, and the result is trimmed. A bare `&` is kept.
/// Whitespace inside the text is left as is. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use town_green_news::utils::clean_text;
///
/// assert_eq!(clean_text("<p>Road work &amp; detours</p>"), "Road work   detours");
/// ```
pub fn clean_text(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, " ");
    let without_entities = ENTITY_RE.replace_all(&without_tags, " ");
    without_entities.trim().to_string()
}

/// Format a publish instant the way the digest shows it, e.g. `2/21/2026`.
///
/// The date is shown in the reader's local time zone.
pub fn format_publish_date(published_at: &DateTime<Utc>) -> String {
    published_at
        .with_timezone(&Local)
        .format("%-m/%-d/%Y")
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a character boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
