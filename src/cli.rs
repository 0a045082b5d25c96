use crate::config::CONFIG_FILE_NAME;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dmascore",
    version,
    about = "Data maturity assessment scorer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score an answer set against a question catalog.
    Score(ScoreArgs),
    /// Write a default config file.
    Init(InitArgs),
    /// Print the effective maturity tier table.
    Tiers(TiersArgs),
    /// Check inputs and config without scoring.
    Validate(ValidateArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[arg(long)]
    pub answers: PathBuf,
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct TiersArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub answers: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
}
