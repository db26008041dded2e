//! Error types for revenue-pulse

use thiserror::Error;

/// Main error type for revenue-pulse operations
#[derive(Error, Debug)]
pub enum RevenuePulseError {
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Room type not found: {0}")]
    RoomTypeNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for revenue-pulse operations
pub type Result<T> = std::result::Result<T, RevenuePulseError>;
