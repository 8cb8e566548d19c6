//! Output generation for a finished refresh.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`RefreshOutcome`](crate::models::RefreshOutcome) to a JSON file
//! - [`markdown`]: Renders the merged items as a Markdown digest
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── feed.json
//!
//! markdown_output_dir/
//! └── feed.md
//! ```

pub mod json;
pub mod markdown;
