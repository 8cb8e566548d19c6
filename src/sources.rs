//! The registry of feeds to refresh.
//!
//! The built-in registry covers the three local outlets. An alternative list
//! can be supplied as YAML:
//!
//! ```yaml
//! sources:
//!   - endpoint: https://myvalleynews.com/feed/
//!     tag: valley_news
//!   - endpoint: https://patch.com/california/murrieta/rss.xml
//!     tag: patch
//! ```
//!
//! Order is preserved; it only matters for undated items, which keep
//! registry order at the bottom of the merged list.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

use crate::error::FeedError;
use crate::models::{FeedSource, SourceTag};

const DEFAULT_REGISTRY: [(&str, SourceTag); 3] = [
    ("https://myvalleynews.com/feed/", SourceTag::ValleyNews),
    (
        "https://patch.com/california/murrieta/rss.xml",
        SourceTag::Patch,
    ),
    (
        "https://www.pe.com/location/california/riverside-county/murrieta/feed/",
        SourceTag::PressEnterprise,
    ),
];

#[derive(Debug, Deserialize)]
struct SourcesFile {
    sources: Vec<FeedSource>,
}

/// The built-in feed list.
pub fn default_sources() -> Vec<FeedSource> {
    DEFAULT_REGISTRY
        .iter()
        .filter_map(|(endpoint, tag)| Url::parse(endpoint).ok().map(|url| FeedSource::new(url, *tag)))
        .collect()
}

/// Parse a YAML source list.
///
/// # Errors
///
/// Returns [`FeedError::Config`] for invalid YAML, unknown tags or malformed
/// URLs, and [`FeedError::NoSources`] for an empty list.
pub fn parse_sources(yaml: &str) -> Result<Vec<FeedSource>, FeedError> {
    let file: SourcesFile = serde_yaml::from_str(yaml)?;
    if file.sources.is_empty() {
        return Err(FeedError::NoSources);
    }
    Ok(file.sources)
}

/// Read a YAML source list from disk.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be read, otherwise the same
/// errors as [`parse_sources`].
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_sources(path: impl AsRef<Path>) -> Result<Vec<FeedSource>, FeedError> {
    let yaml = tokio::fs::read_to_string(path.as_ref()).await?;
    let sources = parse_sources(&yaml)?;
    info!(count = sources.len(), "Loaded feed sources");
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_cover_every_outlet_in_order() {
        let sources = default_sources();
        let tags: Vec<SourceTag> = sources.iter().map(|s| s.tag).collect();
        assert_eq!(tags, SourceTag::ALL.to_vec());
        assert_eq!(sources[0].endpoint.host_str(), Some("myvalleynews.com"));
        assert_eq!(sources[1].endpoint.host_str(), Some("patch.com"));
        assert_eq!(sources[2].endpoint.host_str(), Some("www.pe.com"));
    }

    #[test]
    fn test_parse_sources_preserves_order() {
        let yaml = r#"
sources:
  - endpoint: https://patch.com/california/temecula/rss.xml
    tag: patch
  - endpoint: https://myvalleynews.com/feed/
    tag: valley_news
"#;
        let sources = parse_sources(yaml).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].tag, SourceTag::Patch);
        assert_eq!(
            sources[0].endpoint.as_str(),
            "https://patch.com/california/temecula/rss.xml"
        );
        assert_eq!(sources[1].tag, SourceTag::ValleyNews);
    }

    #[test]
    fn test_parse_sources_rejects_unknown_tag() {
        let yaml = r#"
sources:
  - endpoint: https://example.com/feed
    tag: daily_planet
"#;
        assert!(matches!(parse_sources(yaml), Err(FeedError::Config(_))));
    }

    #[test]
    fn test_parse_sources_rejects_bad_url() {
        let yaml = r#"
sources:
  - endpoint: "not a url"
    tag: patch
"#;
        assert!(matches!(parse_sources(yaml), Err(FeedError::Config(_))));
    }

    #[test]
    fn test_parse_sources_rejects_empty_list() {
        assert!(matches!(
            parse_sources("sources: []"),
            Err(FeedError::NoSources)
        ));
    }

    #[tokio::test]
    async fn test_load_sources_missing_file() {
        let result = load_sources("/nonexistent/town-green/sources.yaml").await;
        assert!(matches!(result, Err(FeedError::Io(_))));
    }
}
