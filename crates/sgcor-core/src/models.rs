use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A single table value.
///
/// `Missing` is an explicit sentinel distinct from zero or the empty string:
/// unparseable or absent input becomes `Missing` and downstream arithmetic
/// branches on presence instead of raising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Absent or unparseable value.
    Missing,
    /// Free text as read from the upload.
    Text(String),
    /// Coerced numeric value.
    Number(f64),
    /// Parsed calendar date.
    Date(NaiveDate),
}

impl Cell {
    /// Build a cell from a raw CSV field. Empty / whitespace-only fields
    /// become [`Cell::Missing`].
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    /// `true` for the missing sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell, `None` unless it is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Date view of the cell, `None` unless it is a `Date`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Text view of the cell, `None` unless it is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

// ── DataTable ─────────────────────────────────────────────────────────────────

/// A named-column, row-major table with an open schema.
///
/// Every pipeline stage consumes and produces this shape; rows always have
/// exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Row-major cell data.
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with `Missing` or truncating so the row width
    /// always matches the column count.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(cells);
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column named `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// `true` when a column named `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate the cells of column `idx` top to bottom.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Apply `f` to every cell of column `idx` in place.
    pub fn map_column<F: Fn(&Cell) -> Cell>(&mut self, idx: usize, f: F) {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }

    /// Keep only the columns whose flag in `keep` is `true`.
    ///
    /// `keep` must have one entry per current column.
    pub fn keep_columns(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.columns.len());
        let mut col = 0;
        self.columns.retain(|_| {
            let k = keep[col];
            col += 1;
            k
        });
        for row in &mut self.rows {
            let mut cell = 0;
            row.retain(|_| {
                let k = keep[cell];
                cell += 1;
                k
            });
        }
    }

    /// Keep only the rows for which `pred` returns `true`.
    pub fn retain_rows<F: FnMut(&[Cell]) -> bool>(&mut self, mut pred: F) {
        self.rows.retain(|row| pred(row));
    }
}

// ── MonthlySummary ────────────────────────────────────────────────────────────

/// Aggregate figures for one calendar month of production.
///
/// One instance per distinct month key; the sequence is always sorted
/// ascending by key (`"YYYY-MM"` sorts chronologically).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Month key, e.g. `"2024-03"`.
    pub month_key: String,
    /// Sum of net premium over the month's rows.
    pub total_premio_liquido: f64,
    /// Sum of commission over the month's rows.
    pub total_comissao: f64,
    /// Sum of payments over the month's rows.
    pub total_pagamento: f64,
    /// Count of rows with a non-missing production id.
    pub total_apolices: u32,
    /// Mean commission over non-missing values, `None` when there are none.
    pub media_comissao: Option<f64>,
    /// Mean commission % over non-missing values, `None` when there are none.
    pub media_percentual_comissao: Option<f64>,
    /// Count of rows whose status is the cancelled literal.
    pub total_cancelamentos: u32,
}

// ── MonthlyMetrics ────────────────────────────────────────────────────────────

/// A [`MonthlySummary`] extended with period-over-period and per-unit ratios.
///
/// Each derived field is `None` (missing) when it has no prior month to
/// compare against or when its denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMetrics {
    /// The underlying monthly aggregate.
    pub summary: MonthlySummary,
    /// Net-premium growth vs. the previous month, in percent.
    pub crescimento_premio_liquido: Option<f64>,
    /// Commission growth vs. the previous month, in percent.
    pub crescimento_comissao: Option<f64>,
    /// Policy count relative to the previous month, in percent.
    pub taxa_conversao: Option<f64>,
    /// Commission per policy for the month.
    pub comissao_por_apolice: Option<f64>,
    /// Ratio of net premium to payments for the month.
    pub premio_liquido_por_faturamento: Option<f64>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Cell ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_cell_from_field_empty_is_missing() {
        assert_eq!(Cell::from_field(""), Cell::Missing);
        assert_eq!(Cell::from_field("   "), Cell::Missing);
    }

    #[test]
    fn test_cell_from_field_trims_text() {
        assert_eq!(
            Cell::from_field("  Cancelada "),
            Cell::Text("Cancelada".to_string())
        );
    }

    #[test]
    fn test_cell_views() {
        assert_eq!(Cell::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Cell::Text("x".into()).as_number(), None);
        assert!(Cell::Missing.is_missing());
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(Cell::Text("abc".into()).as_text(), Some("abc"));
    }

    // ── DataTable ─────────────────────────────────────────────────────────────

    fn sample_table() -> DataTable {
        let mut t = DataTable::new(vec!["a".into(), "b".into(), "c".into()]);
        t.push_row(vec![
            Cell::Number(1.0),
            Cell::Text("x".into()),
            Cell::Missing,
        ]);
        t.push_row(vec![
            Cell::Number(2.0),
            Cell::Text("y".into()),
            Cell::Missing,
        ]);
        t
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut t = DataTable::new(vec!["a".into(), "b".into()]);
        t.push_row(vec![Cell::Number(1.0)]);
        t.push_row(vec![
            Cell::Number(1.0),
            Cell::Number(2.0),
            Cell::Number(3.0),
        ]);
        assert_eq!(t.rows[0], vec![Cell::Number(1.0), Cell::Missing]);
        assert_eq!(t.rows[1].len(), 2);
    }

    #[test]
    fn test_column_lookup() {
        let t = sample_table();
        assert_eq!(t.column_index("b"), Some(1));
        assert!(t.has_column("c"));
        assert!(!t.has_column("z"));
    }

    #[test]
    fn test_column_cells_iterates_in_row_order() {
        let t = sample_table();
        let col: Vec<&Cell> = t.column_cells(0).collect();
        assert_eq!(col, vec![&Cell::Number(1.0), &Cell::Number(2.0)]);
    }

    #[test]
    fn test_map_column() {
        let mut t = sample_table();
        t.map_column(0, |c| match c.as_number() {
            Some(n) => Cell::Number(n * 10.0),
            None => Cell::Missing,
        });
        assert_eq!(t.rows[1][0], Cell::Number(20.0));
    }

    #[test]
    fn test_keep_columns_drops_flagged_out() {
        let mut t = sample_table();
        t.keep_columns(&[true, false, true]);
        assert_eq!(t.columns, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(t.rows[0].len(), 2);
        assert_eq!(t.rows[0][1], Cell::Missing);
    }

    #[test]
    fn test_retain_rows() {
        let mut t = sample_table();
        t.retain_rows(|row| row[0].as_number() == Some(2.0));
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.rows[0][1], Cell::Text("y".into()));
    }
}
