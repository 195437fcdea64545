//! NodePulse CLI - Command-line interface
//!
//! Each pipeline stage is a subcommand reading the previous stage's artifact;
//! `run` chains them all.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::CliError;
use crate::runner::CliRunner;

#[derive(Parser)]
#[command(name = "nodepulse")]
#[command(version = nodepulse::VERSION)]
#[command(about = "Rank proxy nodes by latency and build a subscription", long_about = None)]
struct Cli {
    /// Config file (default: ~/.nodepulse/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download subscription sources into raw_nodes.txt
    Fetch,

    /// Parse and deduplicate raw_nodes.txt into processed_nodes.json
    Parse,

    /// Probe every node in processed_nodes.json into tested_nodes.json
    Probe,

    /// Keep the fastest nodes from tested_nodes.json in filtered_nodes.json
    Select,

    /// Write subscription.txt and README.md from filtered_nodes.json
    Generate,

    /// Fetch, parse, probe, select and generate in one pass
    ///
    /// Artifacts are written only when every stage succeeds.
    Run,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        e.exit();
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let runner = CliRunner::new(cli.config.as_deref(), cli.debug)?;

    match cli.command {
        Commands::Fetch => commands::fetch::run(&runner),
        Commands::Parse => commands::parse::run(&runner),
        Commands::Probe => commands::probe::run(&runner),
        Commands::Select => commands::select::run(&runner),
        Commands::Generate => commands::generate::run(&runner),
        Commands::Run => commands::run::run(&runner),
    }
}
