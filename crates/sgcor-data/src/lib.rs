//! Data pipeline for the SGCor dashboard.
//!
//! Responsible for decoding and parsing the uploaded delimited file, cleaning
//! and type-coercing the resulting table, filtering by negotiated convention,
//! aggregating by calendar month, and deriving period-over-period metrics.

pub mod aggregate;
pub mod clean;
pub mod coerce;
pub mod filter;
pub mod ingest;
pub mod metrics;
pub mod pipeline;

pub use sgcor_core as core;
