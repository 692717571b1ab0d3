//! Pre-aggregation row filter on the negotiated-convention column.

use std::collections::HashSet;

use sgcor_core::models::{Cell, DataTable};
use sgcor_core::schema;
use tracing::debug;

/// Distinct non-missing convention values present in the table, sorted.
///
/// Returns an empty list when the column is absent.
pub fn convention_values(table: &DataTable) -> Vec<String> {
    let Some(idx) = table.column_index(schema::CONVENTION) else {
        return Vec::new();
    };
    let mut values: Vec<String> = table
        .column_cells(idx)
        .filter_map(Cell::as_text)
        .map(|s| s.to_string())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    values.sort();
    values
}

/// Keep only the rows whose convention value is in `selected`.
///
/// Rows with a missing convention are dropped (they cannot match a
/// selection). A table without the column passes through unchanged, matching
/// the upstream behavior of only building the filter when the column exists.
pub fn filter_by_convention(table: &DataTable, selected: &HashSet<String>) -> DataTable {
    let Some(idx) = table.column_index(schema::CONVENTION) else {
        return table.clone();
    };

    let mut filtered = table.clone();
    filtered.retain_rows(|row| {
        row[idx]
            .as_text()
            .map(|v| selected.contains(v))
            .unwrap_or(false)
    });
    debug!(
        before = table.row_count(),
        after = filtered.row_count(),
        "convention filter applied"
    );
    filtered
}

// ── Tests ─────────────────────────────────────────────────────────────────────
