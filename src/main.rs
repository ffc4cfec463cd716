// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr + rotating file)
// 3. Open the response cache, clearing it if asked to
// 4. Run the selected mode and send its results to the chosen output
// 5. Exit with 0 on success, 1 if anything went wrong
//
// Any error that reaches this level is logged with its full cause chain
// and turned into exit code 1; it never panics out of main.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - URLs, directories, constants
mod error; // src/error.rs - typed errors
mod extract; // src/extract/ - HTML element lookup
mod fetch; // src/fetch/ - cached HTTP client
mod logging; // src/logging.rs - tracing setup
mod modes; // src/modes/ - whats-new, latest-versions, download, pep
mod output; // src/output/ - console, table and CSV output

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use cli::Cli;
use config::Settings;
use fetch::{CachedClient, ResponseCache};
use logging::LogConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::new(&cli.docs_url, &cli.peps_url, &cli.base_dir) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard until main returns so the log file gets flushed
    let _log_guard = match logging::init_logging(&LogConfig::from_verbosity(
        cli.verbose,
        settings.logs_dir(),
    )) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Parser launched");
    info!("Command line arguments: {:?}", cli);

    let exit_code = match run(&cli, &settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Program failure: {:#}", e);
            ExitCode::FAILURE
        }
    };

    info!("Parser finished");
    exit_code
}

/// Everything after logging is set up; returns the CSV path when one was written
async fn run(cli: &Cli, settings: &Settings) -> Result<Option<PathBuf>> {
    let cache = ResponseCache::open(settings.cache_dir())
        .await
        .context("could not open the response cache")?;

    if cli.clear_cache {
        let removed = cache.clear().await?;
        info!("Cleared {} cached responses", removed);
    }

    let client = CachedClient::new(cache)?;

    let mode = cli.mode.as_str();
    let results = modes::run_mode(cli.mode, &client, settings)
        .await
        .with_context(|| format!("mode '{}' failed", mode))?;

    let Some(table) = results else {
        return Ok(None);
    };
    if table.is_empty() {
        warn!("Mode '{}' produced no result rows", mode);
    }

    Ok(output::control_output(&table, cli.output, mode, settings)?)
}
