//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Message shown instead of an empty table
pub const NO_RESULTS: &str = "No results found.";

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    format_table_or(data, NO_RESULTS)
}

/// Format data as a table, or return `empty` when there are no rows
pub fn format_table_or<T: Tabled>(data: &[T], empty: &str) -> String {
    if data.is_empty() {
        return empty.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "ID")]
        id: u64,
        #[tabled(rename = "FOLDER")]
        label: String,
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<TestRow> = vec![];
        assert_eq!(format_table(&rows), NO_RESULTS);
        assert_eq!(format_table_or(&rows, "No folders."), "No folders.");
    }

    #[test]
    fn test_format_table_rows() {
        let rows = vec![
            TestRow {
                id: 1,
                label: "Press".to_string(),
            },
            TestRow {
                id: 2,
                label: "Press | 2024".to_string(),
            },
        ];

        let result = format_table(&rows);

        assert!(result.contains("FOLDER"));
        assert!(result.contains("Press | 2024"));
        assert!(result.contains("╭"));
    }
}
