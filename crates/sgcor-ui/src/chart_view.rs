//! Line, bar and scatter charts over the monthly report.
//!
//! Two screens live here: the detailed analysis (totals and growth line
//! charts) and the comparative analysis (commission-per-policy bars plus the
//! premium × payment scatter). Missing derived values simply contribute no
//! point, matching the presence semantics of the data layer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::Span,
    widgets::{Axis, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use sgcor_core::formatting::format_number;
use sgcor_core::models::MonthlyMetrics;

use crate::themes::Theme;

// ── Detailed analysis ─────────────────────────────────────────────────────────

/// Render the detailed analysis screen: monthly totals on top, growth below.
pub fn render_detailed(frame: &mut Frame, area: Rect, rows: &[MonthlyMetrics], theme: &Theme) {
    if rows.is_empty() {
        render_empty(frame, area, " Análises Detalhadas ", theme);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_totals_chart(frame, halves[0], rows, theme);
    render_growth_chart(frame, halves[1], rows, theme);
}

/// Line chart of premium / commission / payment totals per month.
fn render_totals_chart(frame: &mut Frame, area: Rect, rows: &[MonthlyMetrics], theme: &Theme) {
    let premium: Vec<(f64, f64)> = series(rows, |r| Some(r.summary.total_premio_liquido));
    let commission: Vec<(f64, f64)> = series(rows, |r| Some(r.summary.total_comissao));
    let payment: Vec<(f64, f64)> = series(rows, |r| Some(r.summary.total_pagamento));

    let y_max = premium
        .iter()
        .chain(&commission)
        .chain(&payment)
        .map(|&(_, y)| y)
        .fold(f64::MIN, f64::max)
        .max(1.0);
    let y_min = premium
        .iter()
        .chain(&commission)
        .chain(&payment)
        .map(|&(_, y)| y)
        .fold(f64::MAX, f64::min)
        .min(0.0);

    let datasets = vec![
        line_dataset("Prêmio Líquido", &premium, theme.series_premium),
        line_dataset("Comissão", &commission, theme.series_commission),
        line_dataset("Pgto.", &payment, theme.series_payment),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Prêmios, Comissões e Pagamentos por Mês "),
        )
        .x_axis(month_axis(rows, theme))
        .y_axis(value_axis(y_min, y_max, theme));

    frame.render_widget(chart, area);
}

/// Line chart of the two period-over-period growth series.
fn render_growth_chart(frame: &mut Frame, area: Rect, rows: &[MonthlyMetrics], theme: &Theme) {
    let premium_growth: Vec<(f64, f64)> = series(rows, |r| r.crescimento_premio_liquido);
    let commission_growth: Vec<(f64, f64)> = series(rows, |r| r.crescimento_comissao);

    let all: Vec<f64> = premium_growth
        .iter()
        .chain(&commission_growth)
        .map(|&(_, y)| y)
        .collect();
    let y_max = all.iter().copied().fold(f64::MIN, f64::max).max(1.0);
    let y_min = all.iter().copied().fold(f64::MAX, f64::min).min(-1.0);

    let datasets = vec![
        line_dataset("Cresc. Prêmio", &premium_growth, theme.series_premium),
        line_dataset("Cresc. Comissão", &commission_growth, theme.series_commission),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Crescimento de Prêmio Líquido e Comissão (%) "),
        )
        .x_axis(month_axis(rows, theme))
        .y_axis(value_axis(y_min, y_max, theme));

    frame.render_widget(chart, area);
}

// ── Comparative analysis ──────────────────────────────────────────────────────

/// Render the comparative screen: commission-per-policy bars on top and the
/// premium × payment scatter below.
pub fn render_comparative(frame: &mut Frame, area: Rect, rows: &[MonthlyMetrics], theme: &Theme) {
    if rows.is_empty() {
        render_empty(frame, area, " Gráficos Comparativos ", theme);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_commission_bars(frame, halves[0], rows, theme);
    render_premium_payment_scatter(frame, halves[1], rows, theme);
}

/// Bar chart of commission per policy by month. Months with a missing ratio
/// render a zero-height bar.
fn render_commission_bars(frame: &mut Frame, area: Rect, rows: &[MonthlyMetrics], theme: &Theme) {
    let pairs: Vec<(String, u64)> = rows
        .iter()
        .map(|r| {
            let value = r.comissao_por_apolice.unwrap_or(0.0).max(0.0).round() as u64;
            (r.summary.month_key.clone(), value)
        })
        .collect();
    let data: Vec<(&str, u64)> = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Comissão por Apólice "),
        )
        .data(BarGroup::from(&data[..]))
        .bar_width(7)
        .bar_gap(1)
        .bar_style(theme.series_commission)
        .value_style(theme.value)
        .label_style(theme.label);

    frame.render_widget(chart, area);
}

/// Scatter of total premium (x) against total payment (y), one point per
/// month.
fn render_premium_payment_scatter(
    frame: &mut Frame,
    area: Rect,
    rows: &[MonthlyMetrics],
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (r.summary.total_premio_liquido, r.summary.total_pagamento))
        .collect();

    let x_max = points.iter().map(|&(x, _)| x).fold(f64::MIN, f64::max).max(1.0);
    let y_max = points.iter().map(|&(_, y)| y).fold(f64::MIN, f64::max).max(1.0);

    let datasets = vec![Dataset::default()
        .name("Mês")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(theme.series_payment)
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Prêmio Líquido × Faturamento "),
        )
        .x_axis(
            Axis::default()
                .title("Prêmio Líquido")
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_number(x_max, 0)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Pgto.")
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_number(y_max, 0)),
                ]),
        );

    frame.render_widget(chart, area);
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Build an `(index, value)` series, skipping months where `get` is missing.
fn series<F: Fn(&MonthlyMetrics) -> Option<f64>>(
    rows: &[MonthlyMetrics],
    get: F,
) -> Vec<(f64, f64)> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, r)| get(r).map(|v| (i as f64, v)))
        .collect()
}

fn line_dataset<'a>(
    name: &'a str,
    data: &'a [(f64, f64)],
    style: ratatui::style::Style,
) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(style)
        .data(data)
}

/// X axis spanning the month indexes, labelled with the first and last keys.
fn month_axis<'a>(rows: &'a [MonthlyMetrics], theme: &Theme) -> Axis<'a> {
    let max_x = rows.len().saturating_sub(1).max(1) as f64;
    let first = rows.first().map(|r| r.summary.month_key.as_str()).unwrap_or("");
    let last = rows.last().map(|r| r.summary.month_key.as_str()).unwrap_or("");
    Axis::default()
        .style(theme.axis)
        .bounds([0.0, max_x])
        .labels(vec![Span::raw(first), Span::raw(last)])
}

/// Y axis from `min` to `max` with formatted bound labels.
fn value_axis<'a>(min: f64, max: f64, theme: &Theme) -> Axis<'a> {
    Axis::default()
        .style(theme.axis)
        .bounds([min, max])
        .labels(vec![
            Span::raw(format_number(min, 0)),
            Span::raw(format_number(max, 0)),
        ])
}

/// Bordered placeholder when there is nothing to chart.
fn render_empty(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled("Sem dados para exibir", theme.dim)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sgcor_core::models::MonthlySummary;

    fn make_rows() -> Vec<MonthlyMetrics> {
        (1..=3)
            .map(|m| MonthlyMetrics {
                summary: MonthlySummary {
                    month_key: format!("2024-0{m}"),
                    total_premio_liquido: 1000.0 * m as f64,
                    total_comissao: 100.0 * m as f64,
                    total_pagamento: 1100.0 * m as f64,
                    total_apolices: 5 * m,
                    media_comissao: Some(20.0),
                    media_percentual_comissao: Some(10.0),
                    total_cancelamentos: 0,
                },
                crescimento_premio_liquido: (m > 1).then_some(50.0),
                crescimento_comissao: (m > 1).then_some(25.0),
                taxa_conversao: (m > 1).then_some(150.0),
                comissao_por_apolice: Some(20.0),
                premio_liquido_por_faturamento: Some(0.9),
            })
            .collect()
    }

    #[test]
    fn test_render_detailed_does_not_panic() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let rows = make_rows();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_detailed(frame, area, &rows, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_detailed_empty_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_detailed(frame, area, &[], &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_comparative_does_not_panic() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let rows = make_rows();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_comparative(frame, area, &rows, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_comparative_single_month_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let rows = vec![make_rows().remove(0)];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_comparative(frame, area, &rows, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_series_skips_missing_values() {
        let rows = make_rows();
        let growth = series(&rows, |r| r.crescimento_premio_liquido);
        // First month has no growth figure, so only two points remain.
        assert_eq!(growth.len(), 2);
        assert_eq!(growth[0].0, 1.0);
    }
}
