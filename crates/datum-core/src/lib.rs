//! # Datum Core
//!
//! Pure primitives for datums: generic data values, their canonical encoding,
//! typed codecs, content hashes, and ordering.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over immutable trees of [`Data`].
//!
//! ## Key Types
//!
//! - [`Data`] - Recursive generic value (constructor, mapping, sequence, integer, bytes)
//! - [`Datum`] - Opaque payload carrying one [`Data`] alongside a ledger output
//! - [`DatumHash`] - Content-addressed key (Blake3 of the canonical bytes)
//! - [`DataCodec`] - Mapping between application types and [`Data`]
//!
//! ## Canonicalization
//!
//! All values are encoded using a strict, deterministic CBOR subset. See the
//! [`canonical`] module for the exact grammar.

pub mod canonical;
pub mod datum;
pub mod error;
pub mod hash;
pub mod ordering;
pub mod typed;
pub mod value;

pub use canonical::{deserialize, deserialize_with, serialize, DecodeLimits};
pub use datum::{Datum, OutputDatum};
pub use error::{DataError, DecodeError, ShapeFault};
pub use hash::DatumHash;
pub use typed::DataCodec;
pub use value::{Data, DataKind};

// Re-exported so callers can build integers and byte strings without naming
// the underlying crates.
pub use bytes::Bytes;
pub use num_bigint::{BigInt, BigUint};
