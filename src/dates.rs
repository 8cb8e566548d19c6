//! Best-effort normalization of feed timestamps.
//!
//! Feeds publish dates in whatever format their CMS happens to emit. Rather
//! than a general calendar parser, this module keeps an explicit, ordered list
//! of patterns and returns the instant from the first one that consumes the
//! whole (trimmed) string. Order matters: an ambiguous string is interpreted
//! by whichever pattern appears first.
//!
//! # Default patterns
//!
//! | # | Example | Pattern |
//! |---|---------|---------|
//! | 1 | `Sat, 21 Feb 2026 08:15:00 -0800` | `%a, %d %b %Y %H:%M:%S %z` |
//! | 2 | `Sat, 21 Feb 2026 16:15:00 GMT` | `%a, %d %b %Y %H:%M:%S` + zone name |
//! | 3 | `2026-02-21T16:15:00Z` | `%Y-%m-%dT%H:%M:%S%#z` |
//! | 4 | `2026-02-21T16:15:00.250+00:00` | `%Y-%m-%dT%H:%M:%S%.f%#z` |
//! | 5 | `2026-02-21 16:15:00 +0000` | `%Y-%m-%d %H:%M:%S %z` |
//! | 6 | `21 Feb 2026 16:15:00 +0000` | `%d %b %Y %H:%M:%S %z` |
//! | 7 | `Feb 21, 2026 4:15 PM` | `%b %d, %Y %I:%M %p` (UTC) |
//!
//! Patterns that carry no zone are read as UTC, matching what the upstream
//! feeds assume.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

/// One strategy in the ordered pattern list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// A `chrono` format that includes a numeric offset (`%z`, `%#z`).
    WithOffset(&'static str),
    /// A `chrono` format followed by a space and a zone abbreviation.
    WithZoneName(&'static str),
    /// A `chrono` format without any zone, interpreted as UTC.
    Naive(&'static str),
}

impl DatePattern {
    fn parse(self, input: &str) -> Option<DateTime<Utc>> {
        match self {
            DatePattern::WithOffset(fmt) => DateTime::parse_from_str(input, fmt)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DatePattern::WithZoneName(fmt) => {
                let (rest, zone) = input.rsplit_once(' ')?;
                let offset = zone_offset(zone)?;
                let naive = NaiveDateTime::parse_from_str(rest, fmt).ok()?;
                offset
                    .from_local_datetime(&naive)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            DatePattern::Naive(fmt) => NaiveDateTime::parse_from_str(input, fmt)
                .ok()
                .map(|naive| naive.and_utc()),
        }
    }
}

/// The pattern list used by [`parse_timestamp`].
pub const DEFAULT_PATTERNS: [DatePattern; 7] = [
    DatePattern::WithOffset("%a, %d %b %Y %H:%M:%S %z"),
    DatePattern::WithZoneName("%a, %d %b %Y %H:%M:%S"),
    DatePattern::WithOffset("%Y-%m-%dT%H:%M:%S%#z"),
    DatePattern::WithOffset("%Y-%m-%dT%H:%M:%S%.f%#z"),
    DatePattern::WithOffset("%Y-%m-%d %H:%M:%S %z"),
    DatePattern::WithOffset("%d %b %Y %H:%M:%S %z"),
    DatePattern::Naive("%b %d, %Y %I:%M %p"),
];

/// Zone abbreviations seen in RFC-822 style feed dates.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    let hours = match zone.to_ascii_uppercase().as_str() {
        "GMT" | "UT" | "UTC" | "Z" => 0,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

/// Ordered list of timestamp patterns.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    patterns: Vec<DatePattern>,
}

impl DateNormalizer {
    /// Build a normalizer that tries `patterns` top to bottom.
    pub fn new(patterns: Vec<DatePattern>) -> Self {
        Self { patterns }
    }

    /// Parse `raw` with the first pattern that matches all of it.
    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find_map(|pattern| pattern.parse(trimmed))
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.to_vec())
    }
}

static DEFAULT_NORMALIZER: Lazy<DateNormalizer> = Lazy::new(DateNormalizer::default);

/// Parse a feed timestamp with the default pattern list.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DEFAULT_NORMALIZER.parse(raw)
}
