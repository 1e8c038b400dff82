//! # Datum Testkit
//!
//! Testing utilities for datums.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Values with pinned canonical bytes and hashes for cross-implementation checks
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Sample registered types and the values tests keep reaching for
//!
//! ## Golden Vectors
//!
//! ```rust
//! use datum_testkit::vectors::{all_vectors, verify_vector};
//!
//! for vector in all_vectors() {
//!     verify_vector(&vector).unwrap();
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use datum_testkit::generators::data;
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(v in data()) {
//!         prop_assert_eq!(DatumHash::of(&v), DatumHash::of(&v.clone()));
//!     }
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use datum_testkit::fixtures::{answer_constructor, BytesHolder, IntHolder};
//! use datum_core::DataCodec;
//!
//! let value = answer_constructor();
//! assert!(IntHolder::from_data(&value).is_some());
//! assert!(BytesHolder::from_data(&value).is_none());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{BytesHolder, EscrowAction, EscrowState, IntHolder};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
