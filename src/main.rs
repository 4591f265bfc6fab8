//! recycleme entry point.

use clap::Parser;
use std::process::ExitCode;
use tracing::info;

use recycleme_lib::cli::{Cli, USAGE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(file) = cli.file.clone() else {
        println!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let _log_guard = recycleme_lib::init_logging(cli.log_level());

    match recycleme_lib::run(&cli, &file).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // reaches the console too when -v lowers the console level
            info!(error = %format!("{:#}", e), "run.failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
