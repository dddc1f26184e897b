use crate::OutputFormat;
use crate::display;
use anyhow::Result;
use feedscrape_core::artifact::ResultReader;
use std::path::Path;

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Showing saved results from {}", file.display());

    let artifact = ResultReader::from_file(file)?;
    display::print_artifact(&artifact, format)
}
