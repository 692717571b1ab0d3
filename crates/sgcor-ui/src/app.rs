//! Application state and TUI event loop for the SGCor dashboard.
//!
//! [`App`] owns the theme, the current view mode, the session state, and the
//! sidebar filter. The loop is synchronous: all pipeline work happens inline
//! on key events, so a draw always sees a fully rebuilt report.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use sgcor_runtime::session::SessionState;

use crate::chart_view;
use crate::company_view;
use crate::filter_panel::{self, FilterPanelState};
use crate::kpi_view;
use crate::table_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which report view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Monthly summary table with totals.
    Overview,
    /// Totals and growth line charts.
    Detailed,
    /// Grand-total KPI cards.
    Kpis,
    /// Commission-per-policy bars and the premium × payment scatter.
    Comparative,
    /// Registrations per company.
    Companies,
}

impl ViewMode {
    /// Resolve a view name from the command line. Unknown names fall back to
    /// the overview.
    pub fn from_name(name: &str) -> Self {
        match name {
            "detailed" => Self::Detailed,
            "kpis" => Self::Kpis,
            "comparative" => Self::Comparative,
            "companies" => Self::Companies,
            _ => Self::Overview,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Overview => "Resumo Geral",
            Self::Detailed => "Análises Detalhadas",
            Self::Kpis => "KPIs",
            Self::Comparative => "Comparativos",
            Self::Companies => "Companhias",
        }
    }
}

const VIEW_ORDER: [ViewMode; 5] = [
    ViewMode::Overview,
    ViewMode::Detailed,
    ViewMode::Kpis,
    ViewMode::Comparative,
    ViewMode::Companies,
];

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Loaded table, filter selection and derived report.
    pub session: SessionState,
    /// Sidebar filter cursor state.
    pub filter: FilterPanelState,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Transient message shown in the footer, cleared on the next key.
    status: Option<String>,
}

impl App {
    pub fn new(theme_name: &str, view_mode: ViewMode, session: SessionState) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            session,
            filter: FilterPanelState::default(),
            should_quit: false,
            status: None,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so resizes repaint
    /// promptly without a busy loop. Exits on `q`, `Q`, or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Apply one key event to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.filter.open {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('f') | KeyCode::Char('F') => self.filter.toggle(),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.view_mode = VIEW_ORDER[index];
            }
            _ => {}
        }
    }

    /// Key handling while the sidebar is open.
    fn handle_filter_key(&mut self, key: KeyEvent) {
        let conventions: Vec<String> = self.session.conventions().to_vec();
        match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('F') => self.filter.toggle(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up => self.filter.move_up(),
            KeyCode::Down => self.filter.move_down(conventions.len()),
            KeyCode::Char(' ') => {
                if let Some(value) = self.filter.current(&conventions) {
                    let value = value.to_string();
                    if let Err(err) = self.session.toggle_convention(&value) {
                        self.status = Some(err.to_string());
                    }
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                if let Err(err) = self.session.select_all_conventions() {
                    self.status = Some(err.to_string());
                }
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_footer(frame, chunks[2]);

        let body = chunks[1];
        let content = if self.filter.open {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(20)])
                .split(body);
            filter_panel::render_filter_panel(frame, halves[0], &self.session, &self.filter, &self.theme);
            halves[1]
        } else {
            body
        };

        let Some(report) = self.session.report() else {
            table_view::render_no_data(frame, content, &self.theme);
            return;
        };

        match self.view_mode {
            ViewMode::Overview => {
                table_view::render_overview(frame, content, &report.rows, &report.totals, &self.theme)
            }
            ViewMode::Detailed => chart_view::render_detailed(frame, content, &report.rows, &self.theme),
            ViewMode::Kpis => kpi_view::render_kpis(frame, content, &report.totals, &self.theme),
            ViewMode::Comparative => {
                chart_view::render_comparative(frame, content, &report.rows, &self.theme)
            }
            ViewMode::Companies => match self.session.company_counts() {
                Ok(counts) => company_view::render_companies(frame, content, &counts, &self.theme),
                Err(_) => company_view::render_missing_column(frame, content, &self.theme),
            },
        }
    }

    /// One-line header: title plus the numbered view tabs.
    fn render_header(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let mut spans = vec![Span::styled(" Dashboard SGCor ", self.theme.header)];
        for (i, mode) in VIEW_ORDER.iter().enumerate() {
            let style = if *mode == self.view_mode {
                self.theme.bold
            } else {
                self.theme.dim
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, mode.title()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// One-line footer: key hints, or the transient status message.
    fn render_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let line = match &self.status {
            Some(message) => Line::from(Span::styled(message.clone(), self.theme.error)),
            None => Line::from(Span::styled(
                " 1-5: visão  f: filtro  q: sair ",
                self.theme.dim,
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
