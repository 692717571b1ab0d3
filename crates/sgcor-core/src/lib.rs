//! Core types for the SGCor dashboard.
//!
//! Defines the tagged cell value and table model shared by every stage of the
//! pipeline, the production-report column schema, the error type, number
//! formatting, and CLI settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod schema;
pub mod settings;
