//! Derived period-over-period and per-unit metrics.
//!
//! Operates on the chronologically ordered monthly summary sequence. Every
//! derived field is missing for the first month (no prior period) and
//! whenever its denominator is zero; a missing cell, never an infinity and
//! never an error.

use sgcor_core::models::{MonthlyMetrics, MonthlySummary};

/// Extend each summary row with growth rates and per-unit ratios.
///
/// Row order and count are preserved.
pub fn derive_metrics(summaries: Vec<MonthlySummary>) -> Vec<MonthlyMetrics> {
    let mut out = Vec::with_capacity(summaries.len());
    let mut prev: Option<MonthlySummary> = None;

    for summary in summaries {
        let metrics = MonthlyMetrics {
            crescimento_premio_liquido: pct_change(
                summary.total_premio_liquido,
                prev.as_ref().map(|p| p.total_premio_liquido),
            ),
            crescimento_comissao: pct_change(
                summary.total_comissao,
                prev.as_ref().map(|p| p.total_comissao),
            ),
            taxa_conversao: prev
                .as_ref()
                .map(|p| f64::from(p.total_apolices))
                .and_then(|prev_count| {
                    ratio(f64::from(summary.total_apolices), prev_count).map(|r| r * 100.0)
                }),
            comissao_por_apolice: ratio(
                summary.total_comissao,
                f64::from(summary.total_apolices),
            ),
            premio_liquido_por_faturamento: ratio(
                summary.total_premio_liquido,
                summary.total_pagamento,
            ),
            summary: summary.clone(),
        };
        out.push(metrics);
        prev = Some(summary);
    }

    out
}

/// Percent change vs. the prior value; missing without a prior or on a zero
/// prior.
fn pct_change(current: f64, previous: Option<f64>) -> Option<f64> {
    let prev = previous?;
    if prev == 0.0 {
        return None;
    }
    Some((current - prev) / prev * 100.0)
}

/// Plain ratio with the zero-denominator-is-missing policy.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
