use std::process::ExitCode;

use clap::Parser;
use theme_changer_cli::{execute, Cli};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `THEMECTL_LOG=debug`.
const LOG_ENV: &str = "THEMECTL_LOG";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match execute(&cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("themectl: {err:#}");
            ExitCode::FAILURE
        }
    }
}
