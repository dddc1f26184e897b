use clap::ValueEnum;

pub mod commands;
pub mod display;
pub mod progress;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}
