//! Table cleaning: structural column drops and date parsing.
//!
//! Coercion failures on date cells are silently nulled to `Missing`; real
//! exports are dirty and a single bad date must not abort the pipeline.

use chrono::NaiveDate;
use regex::Regex;
use sgcor_core::models::{Cell, DataTable};
use sgcor_core::schema;
use tracing::debug;

/// Naming pattern of synthetic positional columns produced by upstream
/// parsers for unlabelled fields.
const SYNTHETIC_COLUMN_PATTERN: &str = r"^Unnamed";

/// Run the full cleaning pass.
///
/// 1. Drop columns where every value is missing.
/// 2. Drop synthetic index columns (`Unnamed*`).
/// 3. Parse every `Data*` column under the `%d/%m/%Y` format; cells that do
///    not conform become missing.
pub fn clean_table(mut table: DataTable) -> DataTable {
    drop_empty_columns(&mut table);
    drop_synthetic_columns(&mut table);
    parse_date_columns(&mut table);
    table
}

/// Drop any column whose every cell is [`Cell::Missing`].
fn drop_empty_columns(table: &mut DataTable) {
    let keep: Vec<bool> = (0..table.columns.len())
        .map(|idx| table.column_cells(idx).any(|c| !c.is_missing()))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        debug!(dropped, "removed all-empty columns");
        table.keep_columns(&keep);
    }
}

/// Drop columns whose name matches the synthetic-index pattern.
fn drop_synthetic_columns(table: &mut DataTable) {
    // The pattern is a compile-time constant; it cannot fail to build.
    let re = Regex::new(SYNTHETIC_COLUMN_PATTERN).expect("valid synthetic-column regex");
    let keep: Vec<bool> = table.columns.iter().map(|c| !re.is_match(c)).collect();
    if keep.iter().any(|k| !*k) {
        table.keep_columns(&keep);
    }
}

/// Parse the text cells of every date-labelled column.
fn parse_date_columns(table: &mut DataTable) {
    let date_cols: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| name.contains(schema::DATE_MARKER))
        .map(|(idx, _)| idx)
        .collect();

    for idx in date_cols {
        table.map_column(idx, |cell| match cell {
            Cell::Text(s) => match NaiveDate::parse_from_str(s, schema::DATE_FORMAT) {
                Ok(d) => Cell::Date(d),
                Err(_) => Cell::Missing,
            },
            Cell::Date(d) => Cell::Date(*d),
            _ => Cell::Missing,
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
