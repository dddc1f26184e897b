use super::types::ArtifactRef;
use crate::record::ScrapeResult;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Persists scrape results as `<output_dir>/video_data_<timestamp>.json`
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the artifact for `timestamp` is written to
    pub fn artifact_path(&self, timestamp: &str) -> PathBuf {
        self.output_dir.join(format!("video_data_{}.json", timestamp))
    }

    /// Write `result`, creating the output directory if needed
    pub fn write(&self, result: &ScrapeResult) -> Result<PathBuf> {
        let path = self.artifact_path(&result.timestamp);
        tracing::debug!("Writing results to: {}", path.display());

        fs::create_dir_all(&self.output_dir).map_err(|source| Error::Persistence {
            path: self.output_dir.clone(),
            source,
        })?;

        let file = File::create(&path).map_err(|source| Error::Persistence {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        Self::serialize(&ArtifactRef::from(result), &mut writer)?;
        writer.flush().map_err(|source| Error::Persistence {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            "Successfully saved {} videos to {}",
            result.records.len(),
            path.display()
        );

        Ok(path)
    }

    /// Convert a result to the artifact's JSON text
    pub fn to_string(result: &ScrapeResult) -> Result<String> {
        let mut buf = Vec::new();
        Self::serialize(&ArtifactRef::from(result), &mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Config(e.to_string()))
    }

    fn serialize<W: Write>(artifact: &ArtifactRef<'_>, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        artifact.serialize(&mut ser)?;
        Ok(())
    }
}
