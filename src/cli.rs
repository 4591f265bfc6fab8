//! Command-line interface definition using clap.

use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: recycleme <file_path>";

/// recycleme - rewrite the sentences an AI detector flags in your text
#[derive(Parser, Debug)]
#[command(name = "recycleme")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text file to check and rewrite
    pub file: Option<PathBuf>,

    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a JSON config file
    #[arg(short, long, env = "RECYCLEME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the detection report without creating a working copy
    #[arg(long)]
    pub report_only: bool,
}

impl Cli {
    /// Returns the console log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
