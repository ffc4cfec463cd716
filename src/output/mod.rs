// src/output/mod.rs
// =============================================================================
// Rendering a mode's ResultTable.
//
// Submodules:
// - table: the ResultTable type itself
// - console: plain lines (the default)
// - pretty: boxed table (--output pretty)
// - csv_file: timestamped CSV under results/ (--output file)
// =============================================================================

mod console;
mod csv_file;
mod pretty;
mod table;

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::debug;

use console::print_plain;
use csv_file::save_csv;
use pretty::print_pretty;
pub use table::ResultTable;

use crate::config::Settings;
use crate::error::{Result, ScraperError};

/// Where results go when --output is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

/// Sends `table` to the chosen sink
///
/// Returns the path of the CSV file when one was written.
pub fn control_output(
    table: &ResultTable,
    format: Option<OutputFormat>,
    mode: &str,
    settings: &Settings,
) -> Result<Option<PathBuf>> {
    debug!("Rendering {} result rows as {:?}", table.len(), format);
    match format {
        Some(OutputFormat::Pretty) => {
            print_pretty(table);
            Ok(None)
        }
        Some(OutputFormat::File) => save_csv(table, &settings.results_dir(), mode).map(Some),
        None => {
            print_plain(table).map_err(|e| ScraperError::io("<stdout>", e))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAIN_DOC_URL, PEP_SITE_URL};
    use tempfile::TempDir;

    #[test]
    fn test_file_output_lands_in_results_dir() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::new(MAIN_DOC_URL, PEP_SITE_URL, temp.path()).unwrap();

        let mut table = ResultTable::new(["Status", "Count"]);
        table.push_row(["Total", "0"]);

        let path = control_output(&table, Some(OutputFormat::File), "pep", &settings)
            .unwrap()
            .unwrap();

        assert_eq!(path.parent().unwrap(), settings.results_dir());
        assert!(path.exists());
    }

    #[test]
    fn test_console_output_writes_no_file() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::new(MAIN_DOC_URL, PEP_SITE_URL, temp.path()).unwrap();
        let table = ResultTable::new(["Status", "Count"]);

        let path = control_output(&table, None, "pep", &settings).unwrap();

        assert!(path.is_none());
        assert!(!settings.results_dir().exists());
    }
}
