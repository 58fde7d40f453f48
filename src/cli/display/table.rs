//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table with a count line, or a "No ... found." message when empty.
pub fn render_list(singular: &str, plural: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {plural} found.");
    }
    let noun = if total == 1 { singular } else { plural };
    format!("{} {}:\n{}", style(total).bold(), noun, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_list() {
        let table = list_table(&["id", "name"]);
        assert_eq!(render_list("person", "people", &table, 0), "No people found.");
    }

    #[test]
    fn test_render_list_includes_rows() {
        let mut table = list_table(&["id", "name"]);
        table.add_row(vec!["1", "Ann"]);
        let rendered = render_list("idea", "ideas", &table, 1);
        assert!(rendered.contains("idea:"));
        assert!(rendered.contains("Ann"));
        assert!(rendered.contains("NAME"));
    }
}
