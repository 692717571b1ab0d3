//! Registrations per company: a horizontal ranking of policy counts.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Render a bar chart with one bar per company, tallest first.
///
/// `counts` is already sorted by company name; the view re-sorts by count so
/// the busiest companies lead the chart.
pub fn render_companies(frame: &mut Frame, area: Rect, counts: &[(String, u32)], theme: &Theme) {
    if counts.is_empty() {
        render_missing_column(frame, area, theme);
        return;
    }

    let mut ranked: Vec<(&str, u64)> = counts
        .iter()
        .map(|(name, n)| (name.as_str(), u64::from(*n)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Cadastros por Companhia "),
        )
        .data(BarGroup::from(&ranked[..]))
        .bar_width(9)
        .bar_gap(2)
        .bar_style(theme.series_premium)
        .value_style(theme.value)
        .label_style(theme.label);

    frame.render_widget(chart, area);
}

/// Shown when the upload has no company column at all.
pub fn render_missing_column(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Coluna 'Companhia' não encontrada no arquivo",
            theme.warning,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Cadastros por Companhia "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
