//! JSON snapshot of a refresh.
//!
//! Each run overwrites `{json_output_dir}/feed.json` with the merged items
//! and the failure flag, so a consumer always reads the latest refresh.

use crate::models::RefreshOutcome;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// File name written inside the JSON output directory.
pub const FEED_JSON: &str = "feed.json";

/// Write a [`RefreshOutcome`] to `{json_output_dir}/feed.json`.
///
/// # Returns
///
/// The path written, or an error if directory creation or file writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_outcome(
    outcome: &RefreshOutcome,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(outcome)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(FEED_JSON);
    fs::write(&path, json).await?;
    info!(path = %path.display(), items = outcome.items.len(), "Wrote JSON feed file");

    Ok(path)
}
