//! Error types for globefin

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for globefin
#[derive(Error, Debug)]
pub enum GlobefinError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("Malformed source: {0}")]
    MalformedSource(String),

    #[error(
        "No common years with complete {indicator} data found for SGP, IND, and USA from {min_year} onwards"
    )]
    NoAlignedData { indicator: String, min_year: i32 },

    #[error("Refusing to write empty table: {}", path.display())]
    EmptyTable { path: PathBuf },

    #[error("Normalized table not found: {}", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("Malformed normalized table: {0}")]
    MalformedArtifact(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl GlobefinError {
    /// True for conditions the caller caused with bad input, as opposed to data problems
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GlobefinError::InvalidArgument(_))
    }
}

/// Result type alias for globefin operations
pub type Result<T> = std::result::Result<T, GlobefinError>;
