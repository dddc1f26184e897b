use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use feedscrape_cli::OutputFormat;
use feedscrape_cli::commands::{self, search::SearchArgs};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "feedscrape")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Scrape video search results from infinite-scroll feeds into JSON",
    long_about = "feedscrape drives a headless Chrome through a video search feed, scrolls until \
                  no more results load, and saves each video's title, URL, duration, \
                  description and thumbnail to a timestamped JSON file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Also write a debug log to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a video feed and save every result
    Search(SearchArgs),

    /// Display a previously saved results file
    Show {
        /// Path to a video_data_*.json file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for feedscrape.\n\n\
                            SUPPORTED SHELLS:\n  \
                            bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: feedscrape completion --shell bash >> ~/.bashrc\n  \
                            zsh:  feedscrape completion --shell zsh > ~/.zfunc/_feedscrape\n  \
                            fish: feedscrape completion --shell fish > ~/.config/fish/completions/feedscrape.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Search(args) => commands::search::execute(args, cli.format),
        Commands::Show { file } => commands::show::execute(&file, cli.format),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use std::fs::{self, OpenOptions};
    use std::sync::Mutex;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let console_filter = if verbose {
        EnvFilter::new(
            "feedscrape=debug,feedscrape_cli=debug,feedscrape_core=debug,feedscrape_browser=debug",
        )
    } else {
        EnvFilter::new("feedscrape=info,feedscrape_cli=info")
    };

    let console = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(EnvFilter::new("debug,chromiumoxide=info")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry().with(console).with(file).init();

    Ok(())
}
