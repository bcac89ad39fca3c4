//! Error types for the manifest cleaning pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid value in column {column}: {value}")]
    InvalidValue { column: String, value: String },

    #[error("Missing value in column {column}")]
    MissingValue { column: String },

    #[error("Imputation parameters not estimated")]
    NotFitted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        PrepError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        PrepError::Serialization(err.to_string())
    }
}
