// src/output/csv_file.rs
// =============================================================================
// CSV output: <results_dir>/<mode>_<timestamp>.csv
//
// Unix dialect: comma delimiter, every field quoted, '\n' line endings.
// The file mirrors the result table exactly, header included.
// =============================================================================

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use super::table::ResultTable;
use crate::config::DATETIME_FORMAT;
use crate::error::{Result, ScraperError};

/// Writes `table` into a new timestamped file under `results_dir`
pub fn save_csv(table: &ResultTable, results_dir: &Path, mode: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir).map_err(|e| ScraperError::io(results_dir, e))?;

    let file_name = format!("{}_{}.csv", mode, Local::now().format(DATETIME_FORMAT));
    let path = results_dir.join(file_name);

    let file = std::fs::File::create(&path).map_err(|e| ScraperError::io(&path, e))?;
    write_csv(table, file)?;

    info!("Results saved to file: {}", path.display());
    Ok(path)
}

pub fn write_csv<W: Write>(table: &ResultTable, out: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    for row in table.all_rows() {
        writer.write_record(row)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ResultTable {
        let mut table = ResultTable::new(["Article link", "Title", "Editor, author"]);
        table.push_row([
            "https://docs.python.org/3/whatsnew/3.12.html",
            "What’s New In Python 3.12",
            "Editor: Adam Turner",
        ]);
        table.push_row(["https://x/", "has \"quotes\"", "multi, comma"]);
        table
    }

    #[test]
    fn test_fields_are_quoted_with_unix_newlines() {
        let mut table = ResultTable::new(["Status", "Count"]);
        table.push_row(["Final", "1"]);

        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"Status\",\"Count\"\n\"Final\",\"1\"\n"
        );
    }

    #[test]
    fn test_saved_file_reads_back_identically() {
        let temp = TempDir::new().unwrap();
        let table = sample();

        let path = save_csv(&table, &temp.path().join("results"), "whats-new").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("whats-new_"));
        assert!(name.ends_with(".csv"));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let read_back: Vec<Vec<String>> = reader
            .records()
            .map(|record| record.unwrap().iter().map(String::from).collect())
            .collect();

        let expected: Vec<Vec<String>> = table.all_rows().map(|row| row.to_vec()).collect();
        assert_eq!(read_back, expected);
    }
}
