use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// How a strategy reads its value once the selector matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Read {
    Text,
    ScriptText,
    Attribute(String),
}

/// One way of locating a field inside an item element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStrategy {
    pub selector: String,
    pub read: Read,
}

impl FieldStrategy {
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            read: Read::Text,
        }
    }

    pub fn script_text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            read: Read::ScriptText,
        }
    }

    pub fn attribute(selector: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            read: Read::Attribute(name.into()),
        }
    }
}

/// The element carrying both the title and the link of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleAnchor {
    pub selector: String,
    pub title_attribute: String,
    pub url_attribute: String,
}

/// Where a feed lives and how its items are marked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSite {
    pub name: String,
    pub search_endpoint: Url,
    pub query_param: String,
    pub item_selector: String,
    pub title_anchor: TitleAnchor,
    /// Tried in order, first non-empty value wins
    #[serde(default)]
    pub duration: Vec<FieldStrategy>,
    #[serde(default)]
    pub description: Vec<FieldStrategy>,
    #[serde(default)]
    pub thumbnail: Vec<FieldStrategy>,
}

impl FeedSite {
    /// YouTube search results
    pub fn youtube() -> Self {
        Self {
            name: "YouTube".to_string(),
            search_endpoint: Url::parse("https://www.youtube.com/results")
                .expect("static URL is valid"),
            query_param: "search_query".to_string(),
            item_selector: "ytd-video-renderer".to_string(),
            title_anchor: TitleAnchor {
                selector: "#video-title".to_string(),
                title_attribute: "title".to_string(),
                url_attribute: "href".to_string(),
            },
            duration: vec![FieldStrategy::script_text(
                "span.ytd-thumbnail-overlay-time-status-renderer",
            )],
            description: vec![FieldStrategy::text(
                "yt-formatted-string.metadata-snippet-text",
            )],
            thumbnail: vec![
                FieldStrategy::attribute("img.yt-core-image", "src"),
                FieldStrategy::attribute("ytd-thumbnail img", "src"),
                FieldStrategy::attribute("img", "src"),
            ],
        }
    }

    /// Load a site definition from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading site definition from: {}", path.display());

        let file = File::open(path).map_err(|e| {
            Error::Config(format!("cannot open site file {}: {}", path.display(), e))
        })?;
        let site: FeedSite = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::Config(format!("cannot parse site file {}: {}", path.display(), e))
        })?;
        site.validate()?;

        tracing::info!("Loaded site definition '{}'", site.name);
        Ok(site)
    }

    pub fn validate(&self) -> Result<()> {
        if self.item_selector.trim().is_empty() {
            return Err(Error::Config("item_selector is empty".to_string()));
        }
        if self.title_anchor.selector.trim().is_empty() {
            return Err(Error::Config("title_anchor.selector is empty".to_string()));
        }
        if self.query_param.is_empty() {
            return Err(Error::Config("query_param is empty".to_string()));
        }
        Ok(())
    }

    /// Search page URL for `query`, form-encoded (spaces become `+`)
    pub fn search_url(&self, query: &str) -> Result<Url> {
        if query.trim().is_empty() {
            return Err(Error::Config("search query is empty".to_string()));
        }

        let mut url = self.search_endpoint.clone();
        url.query_pairs_mut().append_pair(&self.query_param, query);
        Ok(url)
    }

    /// Resolve a possibly relative link against the search endpoint
    pub fn resolve_link(&self, href: &str) -> Option<String> {
        self.search_endpoint.join(href).ok().map(String::from)
    }
}

impl Default for FeedSite {
    fn default() -> Self {
        Self::youtube()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_spaces() {
        let site = FeedSite::youtube();
        let url = site.search_url("how to fix: sink").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/results?search_query=how+to+fix%3A+sink"
        );
    }

    #[test]
    fn test_search_url_rejects_blank_query() {
        let site = FeedSite::youtube();
        assert!(site.search_url("   ").is_err());
        assert!(site.search_url("").is_err());
    }

    #[test]
    fn test_resolve_relative_link() {
        let site = FeedSite::youtube();
        assert_eq!(
            site.resolve_link("/watch?v=abc").as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
    }

    #[test]
    fn test_resolve_absolute_link_unchanged() {
        let site = FeedSite::youtube();
        assert_eq!(
            site.resolve_link("https://example.com/v/1").as_deref(),
            Some("https://example.com/v/1")
        );
    }

    #[test]
    fn test_site_loads_from_json() {
        let json = r##"{
            "name": "Example",
            "search_endpoint": "https://videos.example.com/search",
            "query_param": "q",
            "item_selector": "li.video",
            "title_anchor": {"selector": "a.title", "title_attribute": "title", "url_attribute": "href"},
            "thumbnail": [{"selector": "img", "read": {"attribute": "src"}}],
            "duration": [{"selector": ".len", "read": "text"}]
        }"##;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, json.as_bytes()).unwrap();

        let site = FeedSite::from_file(file.path()).unwrap();
        assert_eq!(site.item_selector, "li.video");
        assert_eq!(site.thumbnail, vec![FieldStrategy::attribute("img", "src")]);
        assert_eq!(site.duration, vec![FieldStrategy::text(".len")]);
        assert!(site.description.is_empty());
    }

    #[test]
    fn test_site_with_empty_item_selector_rejected() {
        let mut site = FeedSite::youtube();
        site.item_selector = " ".to_string();
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_missing_site_file_is_config_error() {
        let err = FeedSite::from_file(Path::new("/nonexistent/site.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
