//! Error types for the Datum API.

use datum_core::{DataError, DatumHash, DecodeError, ShapeFault};
use thiserror::Error;

/// Errors that can occur during Datum operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The canonical byte grammar was violated.
    #[error("malformed encoding: {0}")]
    Malformed(#[from] DecodeError),

    /// A strict typed decode met a value of the wrong shape.
    #[error("shape fault: {0}")]
    Shape(#[from] ShapeFault),

    /// Input larger than the configured ceiling.
    #[error("input of {len} bytes exceeds limit of {limit}")]
    InputTooLarge { len: usize, limit: usize },

    /// Supplied datum bytes do not hash to the referenced hash.
    #[error("datum hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        expected: DatumHash,
        actual: DatumHash,
    },

    /// A hash slot was resolved without the datum it references.
    #[error("datum {expected} referenced but not supplied")]
    MissingDatum { expected: DatumHash },

    /// Configuration rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<DataError> for Error {
    fn from(e: DataError) -> Self {
        match e {
            DataError::Malformed(e) => Error::Malformed(e),
            DataError::Shape(e) => Error::Shape(e),
        }
    }
}

/// Result type for Datum operations.
pub type Result<T> = std::result::Result<T, Error>;
