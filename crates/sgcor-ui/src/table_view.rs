//! Overview table: the monthly summary plus derived metrics.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per month and
//! a highlighted totals row at the bottom. Missing derived values show the
//! placeholder dash rather than a number.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use sgcor_core::formatting::{format_number, format_opt};
use sgcor_core::models::MonthlyMetrics;
use sgcor_runtime::data::pipeline::ReportTotals;

use crate::themes::Theme;

/// Render the monthly overview table into `area`.
pub fn render_overview(
    frame: &mut Frame,
    area: Rect,
    rows: &[MonthlyMetrics],
    totals: &ReportTotals,
    theme: &Theme,
) {
    let header_cells = [
        "Mês",
        "Prêmio Líq.",
        "Comissão",
        "Pgto.",
        "Apólices",
        "Cancel.",
        "Média Com.",
        "Média % Com.",
        "Cresc. Prêmio",
        "Cresc. Com.",
        "Conversão",
        "Com./Apólice",
        "Prêmio/Pgto.",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let s = &row.summary;
            Row::new(vec![
                Cell::from(s.month_key.clone()),
                Cell::from(format_number(s.total_premio_liquido, 2)),
                Cell::from(format_number(s.total_comissao, 2)),
                Cell::from(format_number(s.total_pagamento, 2)),
                Cell::from(s.total_apolices.to_string()),
                Cell::from(s.total_cancelamentos.to_string()),
                Cell::from(format_opt(s.media_comissao, 2)),
                Cell::from(format_opt(s.media_percentual_comissao, 1)),
                Cell::from(format_opt(row.crescimento_premio_liquido, 1))
                    .style(theme.growth_style(row.crescimento_premio_liquido)),
                Cell::from(format_opt(row.crescimento_comissao, 1))
                    .style(theme.growth_style(row.crescimento_comissao)),
                Cell::from(format_opt(row.taxa_conversao, 1)),
                Cell::from(format_opt(row.comissao_por_apolice, 2)),
                Cell::from(format_opt(row.premio_liquido_por_faturamento, 3)),
            ])
            .style(style)
        })
        .collect();

    // Totals row – styled separately to stand out.
    let total_row = Row::new(vec![
        Cell::from("TOTAL").style(theme.table_total),
        Cell::from(format_number(totals.total_premio_liquido, 2)),
        Cell::from(format_number(totals.total_comissao, 2)),
        Cell::from(format_number(totals.total_pagamento, 2)),
        Cell::from(totals.total_apolices.to_string()),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(13),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Resumo Geral Mensal "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder shown before any upload is loaded.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No production data loaded", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Pass the CSV export on the command line to load it.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" SGCor Dashboard "),
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
        vec![
            MonthlyMetrics {
                summary: MonthlySummary {
                    month_key: "2024-01".to_string(),
                    total_premio_liquido: 10_000.0,
                    total_comissao: 1_000.0,
                    total_pagamento: 11_000.0,
                    total_apolices: 10,
                    media_comissao: Some(100.0),
                    media_percentual_comissao: Some(10.0),
                    total_cancelamentos: 1,
                },
                crescimento_premio_liquido: None,
                crescimento_comissao: None,
                taxa_conversao: None,
                comissao_por_apolice: Some(100.0),
                premio_liquido_por_faturamento: Some(0.909),
            },
            MonthlyMetrics {
                summary: MonthlySummary {
                    month_key: "2024-02".to_string(),
                    total_premio_liquido: 15_000.0,
                    total_comissao: 1_200.0,
                    total_pagamento: 16_000.0,
                    total_apolices: 20,
                    media_comissao: Some(60.0),
                    media_percentual_comissao: Some(8.0),
                    total_cancelamentos: 0,
                },
                crescimento_premio_liquido: Some(50.0),
                crescimento_comissao: Some(20.0),
                taxa_conversao: Some(200.0),
                comissao_por_apolice: Some(60.0),
                premio_liquido_por_faturamento: Some(0.9375),
            },
        ]
    }

    fn make_totals(rows: &[MonthlyMetrics]) -> ReportTotals {
        ReportTotals {
            total_premio_liquido: rows.iter().map(|r| r.summary.total_premio_liquido).sum(),
            total_comissao: rows.iter().map(|r| r.summary.total_comissao).sum(),
            total_pagamento: rows.iter().map(|r| r.summary.total_pagamento).sum(),
            total_apolices: rows.iter().map(|r| r.summary.total_apolices).sum(),
        }
    }

    /// Flatten the rendered buffer for content assertions.
    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_overview_does_not_panic() {
        let backend = TestBackend::new(140, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let rows = make_rows();
        let totals = make_totals(&rows);

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_overview(frame, area, &rows, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_overview_empty_rows_does_not_panic() {
        let backend = TestBackend::new(140, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let totals = ReportTotals::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_overview(frame, area, &[], &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_overview_shows_commission_means() {
        let backend = TestBackend::new(170, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let mut rows = make_rows();
        rows[0].summary.media_comissao = None;
        rows[0].summary.media_percentual_comissao = None;
        let totals = make_totals(&rows);

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_overview(frame, area, &rows, &totals, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Média Com."));
        assert!(text.contains("Média % Com."));
        // 2024-02 carries means; 2024-01 renders the missing placeholder.
        assert!(text.contains("60.00"));
        assert!(text.contains("8.0"));
        assert!(text.contains("—"));
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();
    }
}
