use crate::OutputFormat;
use crate::display;
use crate::progress::ProgressBarReporter;
use anyhow::Result;
use clap::{Args, ValueEnum};
use feedscrape_browser::{ChromeFinder, ChromeLauncher};
use feedscrape_core::artifact::{Artifact, ResultWriter};
use feedscrape_core::{
    FeedSite, PaginationConfig, ScrapeConfig, ScrapeOutcome, ScrapeSession, WaitCondition,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum WaitArg {
    /// First item attached to the DOM
    Presence,
    /// First item rendered on screen
    Visibility,
}

impl From<WaitArg> for WaitCondition {
    fn from(arg: WaitArg) -> Self {
        match arg {
            WaitArg::Presence => WaitCondition::Presence,
            WaitArg::Visibility => WaitCondition::Visibility,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search terms (joined with spaces)
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Directory the JSON results are written to
    #[arg(
        short,
        long,
        env = "FEEDSCRAPE_OUTPUT_DIR",
        default_value = "data_output_files"
    )]
    pub output_dir: PathBuf,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headful: bool,

    /// Seconds to wait for the first result to appear
    #[arg(long, value_name = "SECS", default_value_t = 20)]
    pub timeout: u64,

    /// Milliseconds to wait after each scroll
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub scroll_delay: u64,

    /// Maximum number of scroll cycles
    #[arg(long, value_name = "N", default_value_t = 50)]
    pub max_scrolls: u32,

    /// Unchanged page-height readings in a row before scrolling stops
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub stable_readings: u32,

    /// Overall time limit for scrolling, in seconds
    #[arg(long, value_name = "SECS")]
    pub time_budget: Option<u64>,

    /// When the first result counts as loaded
    #[arg(long, value_enum, default_value = "presence")]
    pub wait: WaitArg,

    /// JSON site definition to use instead of the built-in YouTube one
    #[arg(long, value_name = "FILE")]
    pub site: Option<PathBuf>,

    /// Path to the Chrome/Chromium executable
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Named persistent browser profile (stored in ~/.feedscrape/profiles)
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,
}

impl SearchArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            headless: !self.headful,
            initial_load_timeout: Duration::from_secs(self.timeout),
            wait_condition: self.wait.into(),
            pagination: PaginationConfig {
                scroll_delay: Duration::from_millis(self.scroll_delay),
                max_iterations: self.max_scrolls,
                stable_readings: self.stable_readings,
                time_budget: self.time_budget.map(Duration::from_secs),
            },
            ..ScrapeConfig::default()
        }
    }
}

fn profile_path(name: &str) -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
        .join(".feedscrape")
        .join("profiles")
        .join(name))
}

pub fn execute(args: SearchArgs, format: OutputFormat) -> Result<()> {
    let query = args.query_text();
    tracing::info!("Searching for: {}", query);

    let config = args.scrape_config();
    config.validate()?;

    let site = match &args.site {
        Some(path) => FeedSite::from_file(path)?,
        None => FeedSite::youtube(),
    };

    let chrome_binary = ChromeFinder::new(args.chrome_path.clone()).find()?;
    tracing::debug!("Found Chrome at: {}", chrome_binary.display());

    let mut launcher = ChromeLauncher::new(Some(chrome_binary));
    if let Some(name) = &args.profile {
        let path = profile_path(name)?;
        tracing::info!("Using profile: {}", path.display());
        launcher = launcher.with_profile_dir(path);
    }

    let writer = ResultWriter::new(&args.output_dir);
    let reporter = Arc::new(match format {
        OutputFormat::Pretty => ProgressBarReporter::new(),
        _ => ProgressBarReporter::hidden(),
    });

    let session = ScrapeSession::new(launcher, site, config)
        .with_writer(writer.clone())
        .with_reporter(reporter.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session.run(&query));
    runtime.shutdown_timeout(Duration::from_millis(100));
    reporter.finish();

    let artifact_path = writer.artifact_path(&result.timestamp);

    if let ScrapeOutcome::Failed { reason } = &result.outcome {
        anyhow::bail!("Scrape failed: {}", reason);
    }

    display::print_artifact(&Artifact::from(&result), format)?;

    if artifact_path.exists() {
        tracing::info!("Results saved to: {}", artifact_path.display());
        if format == OutputFormat::Pretty {
            println!("Results saved to: {}", artifact_path.display());
        }
    }

    Ok(())
}
