//! Markdown digest of the merged feed.
//!
//! Each item becomes a section with its headline, outlet, publish date (when
//! known), summary, image, and a link to the full story. A failed refresh
//! renders the retry message instead.

use crate::models::{ExtractedItem, RefreshOutcome};
use crate::utils::format_publish_date;
use std::error::Error;
use std::fmt::Write;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// File name written inside the Markdown output directory.
pub const FEED_MARKDOWN: &str = "feed.md";

fn item_to_markdown(md: &mut String, item: &ExtractedItem) -> std::fmt::Result {
    writeln!(md, "## {}\n", item.title)?;
    match &item.published_at {
        Some(published_at) => writeln!(
            md,
            "**{}** · {}\n",
            item.source,
            format_publish_date(published_at)
        )?,
        None => writeln!(md, "**{}**\n", item.source)?,
    }
    if !item.description.is_empty() {
        writeln!(md, "{}\n", item.description)?;
    }
    if let Some(image_url) = &item.image_url {
        writeln!(md, "![]({image_url})\n")?;
    }
    writeln!(md, "[Read the full story]({})\n", item.link)
}

/// Render a refresh as Markdown.
pub fn outcome_to_markdown(outcome: &RefreshOutcome) -> Result<String, std::fmt::Error> {
    let mut md = String::from("# Local News\n\n");

    if let Some(message) = outcome.error_message() {
        writeln!(md, "> {message}")?;
        return Ok(md);
    }

    for item in &outcome.items {
        item_to_markdown(&mut md, item)?;
    }
    Ok(md)
}

/// Write the digest to `{markdown_output_dir}/feed.md`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_digest(
    outcome: &RefreshOutcome,
    markdown_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(markdown_output_dir).await?;
    let path = PathBuf::from(markdown_output_dir).join(FEED_MARKDOWN);
    fs::write(&path, outcome_to_markdown(outcome)?).await?;
    info!(path = %path.display(), "Wrote Markdown digest");
    Ok(path)
}
