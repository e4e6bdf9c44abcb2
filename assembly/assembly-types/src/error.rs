//! Error types for the assembly data model.

use std::path::PathBuf;
use thiserror::Error;

use crate::part::PartId;

/// Result type for data-model operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while building or loading assembly data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A part with the given id is already in the catalog.
    #[error("part '{id}' already exists in catalog")]
    DuplicatePart {
        /// The duplicate part id.
        id: PartId,
    },

    /// I/O error while reading an asset file.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON in an asset file.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        /// The path of the malformed file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Malformed JSON provided as an in-memory string.
    #[error("invalid JSON: {source}")]
    Parse {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
