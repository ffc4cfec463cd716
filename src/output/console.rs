// src/output/console.rs
// =============================================================================
// Plain output: one line per row, fields separated by a single space.
// =============================================================================

use std::io::{self, Write};

use super::table::ResultTable;

pub fn print_plain(table: &ResultTable) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_plain(table, &mut handle)
}

pub fn write_plain<W: Write>(table: &ResultTable, out: &mut W) -> io::Result<()> {
    for row in table.all_rows() {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}
