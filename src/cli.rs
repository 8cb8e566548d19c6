//! Command-line interface definitions for Town Green News.
//!
//! All options can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for a single refresh.
///
/// # Examples
///
/// ```sh
/// # Refresh the built-in feeds and print a Markdown digest
/// town_green_news
///
/// # Use a custom source list and keep a JSON snapshot
/// town_green_news --sources ./sources.yaml -j ./json
///
/// # Write the digest to disk with a shorter per-feed timeout
/// town_green_news -m ./markdown --timeout-secs 5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML file listing the feeds to refresh (defaults to the built-in list)
    #[arg(short, long, env = "TOWN_GREEN_SOURCES")]
    pub sources: Option<String>,

    /// Per-feed timeout in seconds
    #[arg(long, env = "TOWN_GREEN_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Output directory for the JSON snapshot
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown digest (printed to stdout when omitted)
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,
}
