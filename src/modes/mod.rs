// src/modes/mod.rs
// =============================================================================
// The four things the scraper can do, one submodule each:
// - whats_new: release notes for every Python version
// - latest_versions: documentation link + status per minor version
// - download: the PDF (A4) documentation archive
// - pep: cross-check PEP index statuses against each PEP's own page
//
// Each mode returns a ResultTable (or None when it only writes a file).
// Loops that fetch one page per item report every item as a Step, so a
// failed page becomes a logged skip instead of aborting the whole mode.
// =============================================================================

mod download;
mod latest_versions;
mod pep;
mod status;
mod whats_new;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::config::Settings;
use crate::error::{Result, ScraperError};
use crate::fetch::CachedClient;
use crate::output::ResultTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Links, titles and authors of every "What's New" page
    WhatsNew,
    /// Documentation link, version and status for each Python release
    LatestVersions,
    /// Download the PDF (A4) documentation archive
    Download,
    /// Count PEP statuses and report index/page mismatches
    Pep,
}

impl Mode {
    /// Name used on the command line and in result file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

/// Runs one mode to completion
pub async fn run_mode(
    mode: Mode,
    client: &CachedClient,
    settings: &Settings,
) -> Result<Option<ResultTable>> {
    match mode {
        Mode::WhatsNew => whats_new::whats_new(client, settings).await.map(Some),
        Mode::LatestVersions => latest_versions::latest_versions(client, settings)
            .await
            .map(Some),
        Mode::Download => download::download(client, settings).await.map(|_| None),
        Mode::Pep => pep::pep(client, settings).await.map(Some),
    }
}

/// Outcome of processing one item in a per-page loop
#[derive(Debug)]
pub enum Step<T> {
    Done(T),
    Skipped { url: String, reason: String },
}

impl<T> Step<T> {
    /// Turns an error that `skippable` accepts into a Skipped step
    ///
    /// Any other error is passed through and ends the mode.
    pub fn catch<F>(url: &str, result: Result<T>, skippable: F) -> Result<Step<T>>
    where
        F: Fn(&ScraperError) -> bool,
    {
        match result {
            Ok(value) => Ok(Step::Done(value)),
            Err(e) if skippable(&e) => Ok(Step::Skipped {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Logs a skip and hands back the value of a completed step
    pub fn into_done(self) -> Option<T> {
        match self {
            Step::Done(value) => Some(value),
            Step::Skipped { url, reason } => {
                warn!("Skipped {}: {}", url, reason);
                None
            }
        }
    }
}

/// Progress bar for loops over many pages (drawn on stderr)
pub(crate) fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let style = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    ProgressBar::new(len as u64)
        .with_style(style)
        .with_message(message)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What is Step::catch for?
//    - Each mode decides which errors only cost one item (the `skippable` test)
//    - Those become Step::Skipped; anything else is returned and ends the mode
//    - whats_new skips connection errors, pep also skips structural ones
//
// 2. Why does the progress bar go to stderr?
//    - stdout carries the results, so piping them somewhere stays clean
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_match_cli_values() {
        for mode in Mode::value_variants() {
            let value = mode.to_possible_value().unwrap();
            assert_eq!(value.get_name(), mode.as_str());
        }
    }

    #[test]
    fn test_connection_error_becomes_skip() {
        let err = ScraperError::HttpStatus {
            url: "https://peps.python.org/pep-0001/".to_string(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        let step: Step<String> =
            Step::catch("https://peps.python.org/pep-0001/", Err(err), ScraperError::is_connection)
                .unwrap();

        match step {
            Step::Skipped { url, reason } => {
                assert_eq!(url, "https://peps.python.org/pep-0001/");
                assert!(reason.contains("502"));
            }
            Step::Done(_) => panic!("expected a skip"),
        }
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = ScraperError::TagNotFound {
            tag: "h1".to_string(),
            filter: String::new(),
        };
        let result: Result<Step<String>> = Step::catch("u", Err(err), ScraperError::is_connection);
        assert!(matches!(result, Err(ScraperError::TagNotFound { .. })));
    }

    #[test]
    fn test_done_step_yields_value() {
        let step = Step::catch("u", Ok(7), ScraperError::is_connection).unwrap();
        assert_eq!(step.into_done(), Some(7));
    }
}
