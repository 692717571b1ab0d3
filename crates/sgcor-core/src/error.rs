use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the SGCor dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The uploaded buffer could not be decoded under any supported encoding.
    #[error("Failed to decode upload: {0}")]
    Decode(String),

    /// The delimited text could not be parsed into records.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A column required by the requested view is not present in the data.
    #[error("Column '{0}' not found in the uploaded data")]
    MissingColumn(String),

    /// The cleaned table has no rows to aggregate.
    #[error("No records available after cleaning and filtering")]
    EmptyTable,

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
