use crate::record::{ItemRecord, ScrapeResult};
use serde::{Deserialize, Serialize};

/// On-disk shape of a scrape: `{ "timestamp": ..., "videos": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub timestamp: String,
    pub videos: Vec<ItemRecord>,
}

impl From<&ScrapeResult> for Artifact {
    fn from(result: &ScrapeResult) -> Self {
        Self {
            timestamp: result.timestamp.clone(),
            videos: result.records.clone(),
        }
    }
}

/// Borrowed view used when writing, so results are not cloned
#[derive(Debug, Serialize)]
pub(crate) struct ArtifactRef<'a> {
    pub timestamp: &'a str,
    pub videos: &'a [ItemRecord],
}

impl<'a> From<&'a ScrapeResult> for ArtifactRef<'a> {
    fn from(result: &'a ScrapeResult) -> Self {
        Self {
            timestamp: &result.timestamp,
            videos: &result.records,
        }
    }
}
