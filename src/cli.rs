use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "demark-scanner")]
#[command(about = "DeMark sequential exhaustion scanner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the universe on daily and weekly timeframes and write the report
    Scan {
        /// Path to the ticker universe CSV (overrides TICKER_FILE)
        #[arg(short, long)]
        tickers_file: Option<PathBuf>,

        /// Report output path (default: <REPORT_DIR>/index.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only scan the first N tickers (debugging aid)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show universe size and cache state
    Status,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            tickers_file,
            output,
            limit,
        } => {
            commands::scan::run(tickers_file, output, limit);
        }
        Commands::Status => {
            commands::status::run();
        }
    }
}
