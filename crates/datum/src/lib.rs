//! # Datum
//!
//! The unified API for datums: generic, self-describing values attached to
//! ledger outputs and inspected later by validators.
//!
//! ## Overview
//!
//! - **Data**: A recursive generic value (constructor, mapping, sequence, integer, bytes)
//! - **Canonical encoding**: Deterministic, self-delimiting bytes for storage and hashing
//! - **Content hash**: Blake3 over the canonical bytes, used as a lookup key
//! - **Typed codecs**: Strict and lenient decoding into application types
//! - **Datum**: The opaque payload that carries one value alongside an output
//!
//! ## Usage
//!
//! ```rust
//! use datum::{data_codec, CodecConfig, Data, DataCodec, Datum, DatumCodec};
//!
//! #[derive(Debug, PartialEq)]
//! struct Counter {
//!     value: i64,
//! }
//!
//! data_codec! {
//!     struct Counter { value } = 0;
//! }
//!
//! let codec = DatumCodec::new(CodecConfig::default()).unwrap();
//!
//! let datum = Datum::from_typed(&Counter { value: 42 });
//! let bytes = codec.encode(&datum);
//! let key = codec.hash(&datum);
//!
//! let decoded = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded.hash(), key);
//! assert_eq!(Counter::from_data(decoded.as_data()), Some(Counter { value: 42 }));
//! ```
//!
//! ## Re-exports
//!
//! - `datum::core` - Core primitives (Data, Datum, DatumHash, canonical codec)

pub mod codec;
pub mod config;
pub mod error;

pub use datum_core as core;

pub use codec::DatumCodec;
pub use config::CodecConfig;
pub use error::{Error, Result};

// Re-export commonly used core types
pub use datum_core::{
    data_codec, BigInt, BigUint, Bytes, Data, DataCodec, DataKind, Datum, DatumHash, DecodeError,
    DecodeLimits, OutputDatum, ShapeFault,
};
