//! Terminal UI layer for the SGCor dashboard.
//!
//! Provides themes, the five report views (overview table, detailed line
//! charts, KPI cards, comparative charts, per-company registrations), the
//! sidebar convention filter, and the application event loop built on
//! [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod company_view;
pub mod filter_panel;
pub mod kpi_view;
pub mod table_view;
pub mod themes;

pub use sgcor_core as core;
