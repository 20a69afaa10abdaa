use std::io;
use thiserror::Error;

/// Error type for csv-scout operations.
///
/// Covers the I/O-facing entry points only; recoverable parse diagnostics
/// travel inside [`crate::ParseResult`] instead and never surface here.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Empty file or no data.
    #[error("Empty file or no data to analyze")]
    EmptyData,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for csv-scout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
