use super::types::Artifact;
use crate::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct ResultReader;

impl ResultReader {
    /// Read a previously written artifact
    pub fn from_file(path: &Path) -> Result<Artifact> {
        tracing::debug!("Reading results from: {}", path.display());

        let file = File::open(path)?;
        let artifact: Artifact = serde_json::from_reader(BufReader::new(file))?;

        tracing::info!(
            "Loaded {} videos scraped at {}",
            artifact.videos.len(),
            artifact.timestamp
        );

        Ok(artifact)
    }

    pub fn from_str(content: &str) -> Result<Artifact> {
        Ok(serde_json::from_str(content)?)
    }
}
