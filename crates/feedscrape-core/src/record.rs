use serde::{Deserialize, Serialize};

/// Placeholder used when no duration could be read for an item
pub const UNKNOWN_DURATION: &str = "Unknown";

/// Placeholder used when no description could be read for an item
pub const NO_DESCRIPTION: &str = "No description available";

/// Timestamp format shared by the artifact body and its file name
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// One extracted feed entry.
///
/// Serialized field order is the artifact's column order:
/// title, url, duration, description, thumbnail_url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: String,
    pub url: String,
    /// Text exactly as read from the page, before normalization
    #[serde(skip)]
    pub duration_raw: Option<String>,
    #[serde(rename = "duration")]
    pub duration_display: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

/// How a scrape ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// The feed loaded and every item element was visited
    Completed,
    /// The session stopped early; `records` is empty
    Failed { reason: String },
}

/// Everything one scrape invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub timestamp: String,
    pub query: String,
    /// DOM discovery order, no deduplication
    pub records: Vec<ItemRecord>,
    pub outcome: ScrapeOutcome,
}

impl ScrapeResult {
    pub fn completed(timestamp: String, query: String, records: Vec<ItemRecord>) -> Self {
        Self {
            timestamp,
            query,
            records,
            outcome: ScrapeOutcome::Completed,
        }
    }

    pub fn failed(timestamp: String, query: String, reason: impl Into<String>) -> Self {
        Self {
            timestamp,
            query,
            records: Vec::new(),
            outcome: ScrapeOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ScrapeOutcome::Completed)
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
