//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod analyze;
mod history;
mod init;
mod report;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "ecowaste")]
#[command(about = "AI-assisted waste classification and disposal guidance")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ./ecowaste.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file and initialize the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Start the web server
    Serve {
        /// Bind address: PORT, HOST, or HOST:PORT (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Analyze a waste image from the command line
    Analyze {
        /// Path to the image file
        image: PathBuf,
        /// Two-letter state code (e.g. MH, KA)
        #[arg(short, long)]
        state: String,
    },
    /// List stored classifications
    History {
        /// Maximum number of rows to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Write the PDF report for a classification
    Report {
        /// Classification ID
        id: String,
        /// Output path (defaults to waste_report_<id>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { force } => init::cmd_init(cli.config.as_deref(), &settings, force).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Analyze { image, state } => {
            analyze::cmd_analyze(&settings, &image, &state).await
        }
        Commands::History { limit } => history::cmd_history(&settings, limit).await,
        Commands::Report { id, output } => {
            report::cmd_report(&settings, &id, output.as_deref()).await
        }
    }
}
