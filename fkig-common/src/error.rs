//! Common error types for Fukuoka IG Insights

use thiserror::Error;

/// Common result type for insights operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the insights crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed posts table (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
