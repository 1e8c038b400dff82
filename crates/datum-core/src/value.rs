//! The generic data value.
//!
//! [`Data`] is a closed, recursive tree: tagged constructors, association
//! lists, sequences, arbitrary-precision integers, and byte strings. It is the
//! only thing the canonical codec, the hash, and the ordering operate on.

use bytes::Bytes;
use num_bigint::{BigInt, BigUint};
use std::fmt;

/// A generic, self-describing data value.
///
/// Values are immutable once built; every transformation produces a new tree.
/// Mapping entries keep insertion order and may repeat keys; uniqueness is a
/// concern of whoever interprets the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Data {
    /// Tagged sum-of-products node. The tag selects the expected shape.
    Constructor { tag: BigUint, fields: Vec<Data> },
    /// Ordered association list.
    Map(Vec<(Data, Data)>),
    /// Ordered sequence.
    List(Vec<Data>),
    /// Signed integer of unbounded magnitude.
    Integer(BigInt),
    /// Immutable byte string, possibly empty.
    Bytes(Bytes),
}

/// The five variant kinds of [`Data`].
///
/// The declaration order is the kind priority used by [`Data`]'s `Ord`:
/// `Integer < Bytes < List < Map < Constructor`. This order is part of the
/// format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataKind {
    Integer,
    Bytes,
    List,
    Map,
    Constructor,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataKind::Integer => "integer",
            DataKind::Bytes => "bytes",
            DataKind::List => "list",
            DataKind::Map => "map",
            DataKind::Constructor => "constructor",
        };
        f.write_str(name)
    }
}

impl Data {
    /// Build a constructor node.
    pub fn constructor(tag: impl Into<BigUint>, fields: Vec<Data>) -> Self {
        Data::Constructor {
            tag: tag.into(),
            fields,
        }
    }

    /// Build a mapping from entries, preserving their order.
    pub fn map(entries: Vec<(Data, Data)>) -> Self {
        Data::Map(entries)
    }

    /// Build a sequence.
    pub fn list(items: Vec<Data>) -> Self {
        Data::List(items)
    }

    /// Build an integer.
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Data::Integer(value.into())
    }

    /// Build a byte string.
    pub fn bytes(value: impl Into<Bytes>) -> Self {
        Data::Bytes(value.into())
    }

    /// The variant kind of this value.
    pub fn kind(&self) -> DataKind {
        match self {
            Data::Constructor { .. } => DataKind::Constructor,
            Data::Map(_) => DataKind::Map,
            Data::List(_) => DataKind::List,
            Data::Integer(_) => DataKind::Integer,
            Data::Bytes(_) => DataKind::Bytes,
        }
    }

    pub fn as_constructor(&self) -> Option<(&BigUint, &[Data])> {
        match self {
            Data::Constructor { tag, fields } => Some((tag, fields)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Data, Data)]> {
        match self {
            Data::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Data]> {
        match self {
            Data::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Data::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Data::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<BigInt> for Data {
    fn from(value: BigInt) -> Self {
        Data::Integer(value)
    }
}

impl From<i64> for Data {
    fn from(value: i64) -> Self {
        Data::Integer(value.into())
    }
}

impl From<Bytes> for Data {
    fn from(value: Bytes) -> Self {
        Data::Bytes(value)
    }
}

impl From<Vec<u8>> for Data {
    fn from(value: Vec<u8>) -> Self {
        Data::Bytes(value.into())
    }
}
