// src/output/pretty.rs
// =============================================================================
// Boxed table output via comfy-table. Cells are left aligned and the table
// wraps long cells (URLs) to fit the terminal width.
// =============================================================================

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use super::table::ResultTable;

pub fn render_pretty(results: &ResultTable) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(results.header().iter().map(String::as_str).map(left_cell).collect::<Vec<_>>());

    for row in results.rows() {
        table.add_row(row.iter().map(String::as_str).map(left_cell).collect::<Vec<_>>());
    }

    table
}

pub fn print_pretty(results: &ResultTable) {
    println!("{}", render_pretty(results));
}

fn left_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_table_contains_header_and_rows() {
        let mut results = ResultTable::new(["Documentation link", "Version", "Status"]);
        results.push_row(["https://docs.python.org/3.12/", "3.12", "stable"]);

        let rendered = render_pretty(&results).to_string();

        assert!(rendered.contains("Documentation link"));
        assert!(rendered.contains("3.12"));
        assert!(rendered.contains("stable"));
    }
}
