//! Error types for Datum Core.
//!
//! There are exactly two fault kinds: the byte grammar was violated
//! ([`DecodeError`]), or a value did not have the shape a strict typed decode
//! asserted ([`ShapeFault`]). Everything else in this crate is total.

use thiserror::Error;

use crate::value::DataKind;

/// Malformed canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("invalid head byte 0x{byte:02x} at offset {offset}")]
    InvalidHead { byte: u8, offset: usize },

    #[error("unsupported major type {major} at offset {offset}")]
    UnsupportedMajorType { major: u8, offset: usize },

    #[error("unsupported tag {tag} at offset {offset}")]
    UnsupportedTag { tag: u64, offset: usize },

    #[error("expected {expected} at offset {offset}")]
    UnexpectedItem {
        expected: &'static str,
        offset: usize,
    },

    #[error("indefinite length at offset {offset}")]
    IndefiniteLength { offset: usize },

    #[error("non-canonical encoding at offset {offset}: {reason}")]
    NonCanonical { reason: &'static str, offset: usize },

    #[error("{count} trailing bytes after value")]
    TrailingBytes { count: usize },

    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// A value did not have the shape a strict typed decode expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeFault {
    #[error("expected {expected}, found {found}")]
    WrongKind { expected: DataKind, found: DataKind },

    #[error("expected constructor tag {expected}, found {found}")]
    WrongTag { expected: String, found: String },

    #[error("constructor {tag} is missing field {index}")]
    MissingField { tag: String, index: usize },

    #[error("expected {expected} elements, found {found}")]
    WrongArity { expected: usize, found: usize },

    #[error("integer out of range for {target}")]
    OutOfRange { target: &'static str },

    #[error("byte string of length {found}, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("duplicate key in mapping")]
    DuplicateKey,
}

impl ShapeFault {
    pub(crate) fn wrong_tag(expected: impl ToString, found: impl ToString) -> Self {
        ShapeFault::WrongTag {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Umbrella error for callers that mix decoding and typed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("malformed encoding: {0}")]
    Malformed(#[from] DecodeError),

    #[error("shape fault: {0}")]
    Shape(#[from] ShapeFault),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let e = DecodeError::InvalidHead {
            byte: 0xfe,
            offset: 3,
        };
        assert_eq!(e.to_string(), "invalid head byte 0xfe at offset 3");
    }

    #[test]
    fn test_shape_fault_into_data_error() {
        let e: DataError = ShapeFault::DuplicateKey.into();
        assert!(matches!(e, DataError::Shape(ShapeFault::DuplicateKey)));
        assert_eq!(e.to_string(), "shape fault: duplicate key in mapping");
    }
}
