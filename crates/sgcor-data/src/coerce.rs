//! Numeric coercion of the designated monetary / percentage / count columns.

use sgcor_core::models::{Cell, DataTable};
use sgcor_core::schema;
use tracing::debug;

/// Force the six designated columns to numeric type.
///
/// Text cells that do not parse as a number become missing rather than
/// aborting the column; numbers already coerced pass through unchanged, which
/// makes the pass idempotent. Columns absent from the table are skipped.
pub fn coerce_numeric(table: &mut DataTable) {
    for &name in schema::NUMERIC_COLUMNS {
        let Some(idx) = table.column_index(name) else {
            continue;
        };
        table.map_column(idx, coerce_cell);
        debug!(column = name, "column coerced to numeric");
    }
}

/// Numeric view of a single cell; anything unparseable is missing.
fn coerce_cell(cell: &Cell) -> Cell {
    match cell {
        Cell::Number(n) => Cell::Number(*n),
        Cell::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Missing,
        },
        _ => Cell::Missing,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
