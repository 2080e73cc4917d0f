//! Dataset loader error types
//!
//! Defines all errors that can occur while reading the static datasets.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or reading datasets
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O operation failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON / GeoJSON parsing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from a table
    #[error("Missing column '{column}' in {dataset}")]
    MissingColumn { dataset: String, column: String },

    /// A cell could not be coerced to the expected type
    #[error("Invalid value '{value}' in column '{column}' of {dataset} (row {row})")]
    InvalidValue {
        dataset: String,
        column: String,
        row: usize,
        value: String,
    },

    /// GeoJSON geometry was missing or malformed
    #[error("Invalid geometry: {0}")]
    Geometry(String),

    /// GeoJSON declared a coordinate reference system with no known projection
    #[error("Unsupported CRS '{0}'")]
    UnsupportedCrs(String),

    /// Requested outlet layer is not one of the files listed at startup
    #[error("Unknown outlet layer: {0}")]
    UnknownLayer(String),
}

impl DataError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for dataset operations
pub type DataResult<T> = Result<T, DataError>;
