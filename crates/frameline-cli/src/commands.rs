use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "frameline")]
#[command(about = "Find missing frames in a shooting session, per camera body", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a directory for gaps in frame numbering
    Check {
        /// Directory holding the imported files (not searched recursively)
        dir: PathBuf,
        /// Do not draw a progress bar
        #[arg(long)]
        quiet: bool,
    },
    /// Show the device identity and frame number read from each file
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print configuration values
    PrintConfig,
}
