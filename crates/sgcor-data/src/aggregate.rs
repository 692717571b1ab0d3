//! Monthly aggregation over the cleaned, coerced table.
//!
//! Rows are grouped by the `"YYYY-MM"` key derived from the effective-start
//! date. Rows whose start date failed to parse carry no month key and are
//! silently excluded from every group; this is intentional leniency, not
//! data loss worth aborting over.

use std::collections::BTreeMap;

use sgcor_core::error::{DashboardError, Result};
use sgcor_core::models::{DataTable, MonthlySummary};
use sgcor_core::schema;
use tracing::debug;

// ── MonthAccumulator ──────────────────────────────────────────────────────────

/// Running totals for one month's group of rows.
#[derive(Debug, Default)]
struct MonthAccumulator {
    premium_sum: f64,
    commission_sum: f64,
    commission_count: u32,
    commission_pct_sum: f64,
    commission_pct_count: u32,
    payment_sum: f64,
    policy_count: u32,
    cancelled_count: u32,
}

impl MonthAccumulator {
    fn into_summary(self, month_key: String) -> MonthlySummary {
        MonthlySummary {
            month_key,
            total_premio_liquido: self.premium_sum,
            total_comissao: self.commission_sum,
            total_pagamento: self.payment_sum,
            total_apolices: self.policy_count,
            media_comissao: mean(self.commission_sum, self.commission_count),
            media_percentual_comissao: mean(self.commission_pct_sum, self.commission_pct_count),
            total_cancelamentos: self.cancelled_count,
        }
    }
}

/// Mean over non-missing values; missing when there were none.
fn mean(sum: f64, count: u32) -> Option<f64> {
    (count > 0).then(|| sum / f64::from(count))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Group rows by calendar month of the effective-start date and compute the
/// per-month aggregate figures.
///
/// The effective-start-date column must exist (post-clean it is date-typed);
/// the other aggregated columns are optional and contribute nothing when
/// absent. Output is sorted ascending by month key.
pub fn summarize_monthly(table: &DataTable) -> Result<Vec<MonthlySummary>> {
    let date_idx = table
        .column_index(schema::EFFECTIVE_START)
        .ok_or_else(|| DashboardError::MissingColumn(schema::EFFECTIVE_START.to_string()))?;

    let premium_idx = table.column_index(schema::NET_PREMIUM);
    let commission_idx = table.column_index(schema::COMMISSION);
    let commission_pct_idx = table.column_index(schema::COMMISSION_PCT);
    let payment_idx = table.column_index(schema::PAYMENT);
    let production_id_idx = table.column_index(schema::PRODUCTION_ID);
    let status_idx = table.column_index(schema::STATUS);

    // BTreeMap keys sort lexicographically, which for "YYYY-MM" is
    // chronological order.
    let mut groups: BTreeMap<String, MonthAccumulator> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in &table.rows {
        let Some(date) = row[date_idx].as_date() else {
            skipped += 1;
            continue;
        };
        let key = date.format(schema::MONTH_KEY_FORMAT).to_string();
        let acc = groups.entry(key).or_default();

        if let Some(n) = premium_idx.and_then(|i| row[i].as_number()) {
            acc.premium_sum += n;
        }
        if let Some(n) = commission_idx.and_then(|i| row[i].as_number()) {
            acc.commission_sum += n;
            acc.commission_count += 1;
        }
        if let Some(n) = commission_pct_idx.and_then(|i| row[i].as_number()) {
            acc.commission_pct_sum += n;
            acc.commission_pct_count += 1;
        }
        if let Some(n) = payment_idx.and_then(|i| row[i].as_number()) {
            acc.payment_sum += n;
        }
        if production_id_idx.map(|i| !row[i].is_missing()).unwrap_or(false) {
            acc.policy_count += 1;
        }
        if status_idx
            .and_then(|i| row[i].as_text())
            .map(|s| s == schema::CANCELLED_STATUS)
            .unwrap_or(false)
        {
            acc.cancelled_count += 1;
        }
    }

    if skipped > 0 {
        debug!(skipped, "rows without a parseable start date excluded");
    }

    Ok(groups
        .into_iter()
        .map(|(key, acc)| acc.into_summary(key))
        .collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sgcor_core::models::Cell;

    fn date_cell(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    /// A table with the full aggregated column set.
    fn production_table() -> DataTable {
        DataTable::new(
            [
                schema::EFFECTIVE_START,
                schema::NET_PREMIUM,
                schema::COMMISSION,
                schema::COMMISSION_PCT,
                schema::PAYMENT,
                schema::PRODUCTION_ID,
                schema::STATUS,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }

    fn push_policy(
        t: &mut DataTable,
        date: Cell,
        premium: f64,
        commission: f64,
        pct: f64,
        payment: f64,
        id: Cell,
        status: &str,
    ) {
        t.push_row(vec![
            date,
            Cell::Number(premium),
            Cell::Number(commission),
            Cell::Number(pct),
            Cell::Number(payment),
            id,
            Cell::Text(status.to_string()),
        ]);
    }

    #[test]
    fn test_groups_by_month_key_sorted() {
        let mut t = production_table();
        push_policy(&mut t, date_cell(2024, 3, 10), 100.0, 10.0, 10.0, 120.0, Cell::Text("3".into()), "Ativa");
        push_policy(&mut t, date_cell(2024, 1, 5), 200.0, 20.0, 10.0, 240.0, Cell::Text("1".into()), "Ativa");
        push_policy(&mut t, date_cell(2024, 1, 28), 300.0, 30.0, 10.0, 360.0, Cell::Text("2".into()), "Ativa");

        let summary = summarize_monthly(&t).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].month_key, "2024-01");
        assert_eq!(summary[1].month_key, "2024-03");
        assert!((summary[0].total_premio_liquido - 500.0).abs() < 1e-9);
        assert_eq!(summary[0].total_apolices, 2);
    }

    #[test]
    fn test_missing_start_date_rows_excluded_everywhere() {
        let mut t = production_table();
        push_policy(&mut t, date_cell(2024, 1, 1), 100.0, 10.0, 10.0, 110.0, Cell::Text("1".into()), "Ativa");
        push_policy(&mut t, Cell::Missing, 999.0, 99.0, 9.0, 999.0, Cell::Text("2".into()), "Ativa");

        let summary = summarize_monthly(&t).unwrap();
        assert_eq!(summary.len(), 1);
        // The dateless row contributes to no month's totals.
        assert!((summary[0].total_premio_liquido - 100.0).abs() < 1e-9);
        assert_eq!(summary[0].total_apolices, 1);
    }

    #[test]
    fn test_apolices_counts_non_missing_production_ids() {
        let mut t = production_table();
        push_policy(&mut t, date_cell(2024, 2, 1), 1.0, 1.0, 1.0, 1.0, Cell::Text("a".into()), "Ativa");
        push_policy(&mut t, date_cell(2024, 2, 2), 1.0, 1.0, 1.0, 1.0, Cell::Missing, "Ativa");
        push_policy(&mut t, date_cell(2024, 2, 3), 1.0, 1.0, 1.0, 1.0, Cell::Text("b".into()), "Ativa");

        let summary = summarize_monthly(&t).unwrap();
        assert_eq!(summary[0].total_apolices, 2);
    }

    #[test]
    fn test_cancellation_count_matches_literal() {
        let mut t = production_table();
        push_policy(&mut t, date_cell(2024, 5, 1), 1.0, 1.0, 1.0, 1.0, Cell::Text("1".into()), "Cancelada");
        push_policy(&mut t, date_cell(2024, 5, 2), 1.0, 1.0, 1.0, 1.0, Cell::Text("2".into()), "Ativa");
        push_policy(&mut t, date_cell(2024, 5, 3), 1.0, 1.0, 1.0, 1.0, Cell::Text("3".into()), "cancelada");

        let summary = summarize_monthly(&t).unwrap();
        // Case-sensitive match on the exact literal.
        assert_eq!(summary[0].total_cancelamentos, 1);
    }

    #[test]
    fn test_means_skip_missing_values() {
        let mut t = production_table();
        push_policy(&mut t, date_cell(2024, 6, 1), 1.0, 10.0, 5.0, 1.0, Cell::Text("1".into()), "Ativa");
        t.push_row(vec![
            date_cell(2024, 6, 2),
            Cell::Number(1.0),
            Cell::Missing,
            Cell::Missing,
            Cell::Number(1.0),
            Cell::Text("2".into()),
            Cell::Text("Ativa".into()),
        ]);

        let summary = summarize_monthly(&t).unwrap();
        // Mean over the single non-missing commission, not over both rows.
        assert_eq!(summary[0].media_comissao, Some(10.0));
        assert_eq!(summary[0].media_percentual_comissao, Some(5.0));
    }

    #[test]
    fn test_means_missing_when_no_values() {
        let mut t = production_table();
        t.push_row(vec![
            date_cell(2024, 7, 1),
            Cell::Number(1.0),
            Cell::Missing,
            Cell::Missing,
            Cell::Number(1.0),
            Cell::Text("1".into()),
            Cell::Text("Ativa".into()),
        ]);

        let summary = summarize_monthly(&t).unwrap();
        assert_eq!(summary[0].media_comissao, None);
    }

    #[test]
    fn test_missing_start_date_column_is_error() {
        let t = DataTable::new(vec!["Status".to_string()]);
        let err = summarize_monthly(&t).unwrap_err();
        assert!(err.to_string().contains("Data Vigência Inicial"));
    }

    #[test]
    fn test_two_years_of_months_all_present_and_ordered() {
        let mut t = production_table();
        for year in [2023, 2024] {
            for month in 1..=12 {
                push_policy(
                    &mut t,
                    date_cell(year, month, 15),
                    100.0,
                    10.0,
                    10.0,
                    110.0,
                    Cell::Text(format!("{year}-{month}")),
                    "Ativa",
                );
            }
        }

        let summary = summarize_monthly(&t).unwrap();
        assert_eq!(summary.len(), 24);
        assert_eq!(summary[0].month_key, "2023-01");
        assert_eq!(summary[23].month_key, "2024-12");
        for window in summary.windows(2) {
            assert!(window[0].month_key < window[1].month_key);
        }
        for row in &summary {
            assert_eq!(row.month_key.len(), 7);
            assert_eq!(&row.month_key[4..5], "-");
        }
    }
}
