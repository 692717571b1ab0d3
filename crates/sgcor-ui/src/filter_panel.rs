//! Sidebar multi-select for the negotiated-convention filter.
//!
//! The panel lists every convention found in the upload with a checkbox
//! marker. Cursor movement and toggling are handled by [`FilterPanelState`];
//! the actual selection lives in the session.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sgcor_runtime::session::SessionState;

use crate::themes::Theme;

// ── FilterPanelState ──────────────────────────────────────────────────────────

/// Cursor state for the sidebar. The selection itself is session state.
#[derive(Debug, Default)]
pub struct FilterPanelState {
    /// Whether the sidebar is currently shown.
    pub open: bool,
    /// Index of the highlighted convention.
    pub cursor: usize,
}

impl FilterPanelState {
    /// Flip the panel open or closed, resetting the cursor on open.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        if self.open {
            self.cursor = 0;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// The convention currently under the cursor.
    pub fn current<'a>(&self, conventions: &'a [String]) -> Option<&'a str> {
        conventions.get(self.cursor).map(String::as_str)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the sidebar into `area`.
pub fn render_filter_panel(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    state: &FilterPanelState,
    theme: &Theme,
) {
    let conventions = session.conventions();

    let mut lines: Vec<Line> = Vec::with_capacity(conventions.len() + 2);
    if conventions.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nenhuma convenção no arquivo",
            theme.dim,
        )));
    }

    for (i, value) in conventions.iter().enumerate() {
        let selected = session.is_selected(value);
        let marker = if selected { "[x] " } else { "[ ] " };
        let style = if selected {
            theme.filter_selected
        } else {
            theme.filter_unselected
        };

        let mut spans = Vec::with_capacity(3);
        if i == state.cursor {
            spans.push(Span::styled("> ", theme.filter_cursor));
        } else {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(marker, style));
        spans.push(Span::styled(value.clone(), style));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "espaço: marcar  a: todas  Esc: fechar",
        theme.dim,
    )));

    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Convenção Negociada "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
