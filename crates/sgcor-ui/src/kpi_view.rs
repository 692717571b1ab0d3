//! KPI cards: grand totals across every monthly summary row.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use sgcor_core::formatting::format_currency;
use sgcor_runtime::data::pipeline::ReportTotals;

use crate::themes::Theme;

/// Render the three KPI cards side by side.
pub fn render_kpis(frame: &mut Frame, area: Rect, totals: &ReportTotals, theme: &Theme) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" KPIs - Indicadores Principais ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(inner);

    render_card(
        frame,
        columns[0],
        "Total Prêmio Líquido",
        &format_currency(totals.total_premio_liquido),
        theme,
    );
    render_card(
        frame,
        columns[1],
        "Total Comissão",
        &format_currency(totals.total_comissao),
        theme,
    );
    render_card(
        frame,
        columns[2],
        "Total Pagamento",
        &format_currency(totals.total_pagamento),
        theme,
    );
}

/// One bordered card with a centred title and value.
fn render_card(frame: &mut Frame, area: Rect, title: &str, value: &str, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically centre the two lines within the card.
    let top_pad = inner.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(center_line(title, inner.width, theme.kpi_title));
    lines.push(center_line(value, inner.width, theme.kpi_value));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Centre `text` in a line of `width` cells, accounting for wide glyphs.
fn center_line(text: &str, width: u16, style: ratatui::style::Style) -> Line<'static> {
    let text_width = text.width() as u16;
    let pad = width.saturating_sub(text_width) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad as usize)),
        Span::styled(text.to_string(), style),
    ])
}

// ── Tests ──────────────────────────────────────────────────────────────────────
