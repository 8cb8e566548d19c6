//! # Town Green News
//!
//! Command-line front end for the feed pipeline: refreshes every configured
//! local news feed once and renders the merged result.
//!
//! ## Usage
//!
//! ```sh
//! town_green_news                       # digest to stdout
//! town_green_news -j ./json -m ./md     # JSON snapshot and Markdown file
//! ```
//!
//! When no feed produced anything the retry message is printed and the
//! process exits with status 1, so a wrapper can simply run it again.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use town_green_news::aggregator::refresh;
use town_green_news::feeds::fetcher::HttpFetcher;
use town_green_news::outputs::{json, markdown};
use town_green_news::sources::{default_sources, load_sources};
use town_green_news::utils::ensure_writable_dir;

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("town_green_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Fail early on unusable output directories, before any network work
    for dir in [&args.json_output_dir, &args.markdown_output_dir]
        .into_iter()
        .flatten()
    {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    let sources = match &args.sources {
        Some(path) => load_sources(path).await?,
        None => default_sources(),
    };
    info!(count = sources.len(), "Refreshing feeds");

    let timeout = Duration::from_secs(args.timeout_secs);
    let fetcher = HttpFetcher::new(timeout)?;
    let outcome = refresh(&fetcher, &sources, timeout).await;

    if let Some(dir) = &args.json_output_dir {
        json::write_outcome(&outcome, dir).await.inspect_err(|e| {
            error!(error = %e, "Failed to write JSON snapshot");
        })?;
    }

    match &args.markdown_output_dir {
        Some(dir) => {
            markdown::write_digest(&outcome, dir).await.inspect_err(|e| {
                error!(error = %e, "Failed to write Markdown digest");
            })?;
        }
        None => print!("{}", markdown::outcome_to_markdown(&outcome)?),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = outcome.items.len(),
        failed = outcome.failed,
        "Execution complete"
    );

    if let Some(message) = outcome.error_message() {
        eprintln!("{message}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
