use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hydrological-year parameters and trends for basin time series.
#[derive(Parser)]
#[command(
    name = "hytrend",
    version,
    about = "Hydrological-year parameter extraction and trend statistics"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Extract per-hydrological-year parameters for every basin.
    Extract(ExtractArgs),
    /// Estimate trends from an existing parameter table.
    Trend(TrendArgs),
    /// Extract parameters, then estimate their trends.
    Run(ExtractArgs),
}

/// Arguments for the `extract` and `run` subcommands.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hytrend.toml")]
    pub config: PathBuf,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Restrict to these basins (repeatable); overrides [extract].basins.
    #[arg(short, long = "basin")]
    pub basins: Vec<String>,
}

/// Arguments for the `trend` subcommand.
#[derive(clap::Args)]
pub struct TrendArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hytrend.toml")]
    pub config: PathBuf,

    /// Parameter table to read; defaults to the combined table in the
    /// output directory.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Columns to analyse (repeatable); overrides [trend].columns.
    #[arg(long = "column")]
    pub columns: Vec<String>,
}
