//! Top-level pipeline orchestration.
//!
//! Two halves: [`load_table`] runs the buffer-dependent stages (ingest →
//! clean → coerce) and is what the runtime memoizes; [`build_report`] runs
//! the selection-dependent stages (filter → aggregate → derive) and is
//! re-run on every filter change.

use std::collections::{BTreeMap, HashSet};

use sgcor_core::error::{DashboardError, Result};
use sgcor_core::models::{DataTable, MonthlyMetrics};
use sgcor_core::schema;
use tracing::{debug, info};

use crate::aggregate::summarize_monthly;
use crate::clean::clean_table;
use crate::coerce::coerce_numeric;
use crate::filter::filter_by_convention;
use crate::ingest::parse_table;
use crate::metrics::derive_metrics;

// ── Report ────────────────────────────────────────────────────────────────────

/// Grand totals across every monthly summary row, for the KPI cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTotals {
    pub total_premio_liquido: f64,
    pub total_comissao: f64,
    pub total_pagamento: f64,
    pub total_apolices: u32,
}

/// The fully derived monthly report consumed by the views.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// One row per month, chronologically ordered.
    pub rows: Vec<MonthlyMetrics>,
    /// Sums across all monthly rows.
    pub totals: ReportTotals,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Run the buffer-dependent half of the pipeline: parse, clean, coerce.
pub fn load_table(bytes: &[u8]) -> Result<DataTable> {
    let raw = parse_table(bytes)?;
    let mut table = clean_table(raw);
    coerce_numeric(&mut table);
    info!(
        rows = table.row_count(),
        cols = table.columns.len(),
        "upload cleaned and coerced"
    );
    Ok(table)
}

/// Run the selection-dependent half of the pipeline over a cleaned table.
///
/// `selected` of `None` means no convention filter; `Some(set)` keeps only
/// rows whose convention is in the set before aggregating.
pub fn build_report(table: &DataTable, selected: Option<&HashSet<String>>) -> Result<Report> {
    let filtered;
    let input = match selected {
        Some(set) => {
            filtered = filter_by_convention(table, set);
            &filtered
        }
        None => table,
    };

    let summaries = summarize_monthly(input)?;
    debug!(months = summaries.len(), "monthly summary built");
    let rows = derive_metrics(summaries);

    let totals = ReportTotals {
        total_premio_liquido: rows.iter().map(|r| r.summary.total_premio_liquido).sum(),
        total_comissao: rows.iter().map(|r| r.summary.total_comissao).sum(),
        total_pagamento: rows.iter().map(|r| r.summary.total_pagamento).sum(),
        total_apolices: rows.iter().map(|r| r.summary.total_apolices).sum(),
    };

    Ok(Report { rows, totals })
}

/// Count registrations per company for the per-company view.
///
/// Errors when the company column is absent so the view can show a message
/// while the other views keep working.
pub fn company_counts(table: &DataTable) -> Result<Vec<(String, u32)>> {
    let idx = table
        .column_index(schema::COMPANY)
        .ok_or_else(|| DashboardError::MissingColumn(schema::COMPANY.to_string()))?;

    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for cell in table.column_cells(idx) {
        if let Some(name) = cell.as_text() {
            *counts.entry(name.to_string()).or_default() += 1;
        }
    }
    Ok(counts.into_iter().collect())
}

/// Convenience used by tests and the one-shot CLI path: full pipeline from
/// raw bytes to report, unfiltered.
pub fn analyze_upload(bytes: &[u8]) -> Result<(DataTable, Report)> {
    let table = load_table(bytes)?;
    let report = build_report(&table, None)?;
    Ok((table, report))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
