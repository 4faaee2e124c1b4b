//! # fcc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fcc_cli::analyze::{run_analyze, AnalyzeArgs};
use fcc_cli::categories::{run_categories, CategoriesArgs};
use fcc_cli::config::CliConfig;
use fcc_cli::score::{run_score, ScoreArgs};
use fcc_cli::sections::{run_sections, SectionsArgs};
use fcc_cli::steps::{run_steps, StepsArgs};

/// Food Compliance Checker
///
/// Classifies food products, resolves the applicable compliance checklist,
/// scores answer sheets, and pre-fills answers from package photos.
#[derive(Parser, Debug)]
#[command(name = "fcc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the product taxonomy with its regulatory triggers.
    Categories(CategoriesArgs),

    /// Show the checklist sections a category activates.
    Sections(SectionsArgs),

    /// Show the interview step sequence for a category and capture mode.
    Steps(StepsArgs),

    /// Score an answer sheet.
    Score(ScoreArgs),

    /// Pre-fill answers from a package photo via the analysis service.
    Analyze(AnalyzeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    tracing::debug!("fcc CLI starting");

    let result = CliConfig::load_optional(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Categories(args) => run_categories(&args),
        Commands::Sections(args) => run_sections(&args),
        Commands::Steps(args) => run_steps(&args),
        Commands::Score(args) => run_score(&args),
        Commands::Analyze(args) => run_analyze(&args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
