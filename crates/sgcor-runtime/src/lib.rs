//! Session runtime for the SGCor dashboard.
//!
//! Owns the per-session state: the memoized cleaned table, the convention
//! selection, and the derived monthly report consumed by the UI.

pub mod session;

pub use sgcor_core as core;
pub use sgcor_data as data;
