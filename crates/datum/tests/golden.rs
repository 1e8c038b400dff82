//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the datum encoding must produce identical:
//! - canonical bytes
//! - content hash (blake3 over the canonical bytes)
//!
//! and must reject the malformed inputs listed at the bottom.

use datum::{CodecConfig, Datum, DatumCodec, DatumHash, DecodeError, Error, OutputDatum};
use datum_testkit::generators::datum as any_datum;
use datum_testkit::vectors::{all_vectors, VectorRecord};
use datum_testkit::{fixtures, BytesHolder, EscrowState, IntHolder};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn codec() -> DatumCodec {
    DatumCodec::new(CodecConfig::default()).unwrap()
}

#[test]
fn test_vectors_encode() {
    let codec = codec();
    for v in all_vectors() {
        let datum = Datum::new(v.value.clone());
        assert_eq!(
            hex::encode(codec.encode(&datum)),
            v.canonical_hex,
            "canonical bytes mismatch for {}",
            v.name
        );
        assert_eq!(
            codec.hash(&datum).to_hex(),
            v.hash_hex,
            "hash mismatch for {}",
            v.name
        );
    }
}

#[test]
fn test_vectors_decode() {
    let codec = codec();
    for v in all_vectors() {
        let bytes = hex::decode(v.canonical_hex).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded.as_data(), &v.value, "decode mismatch for {}", v.name);
        assert_eq!(decoded.hash().to_hex(), v.hash_hex, "hash mismatch for {}", v.name);
    }
}

#[test]
fn test_hash_is_plain_blake3() {
    for v in all_vectors() {
        let bytes = hex::decode(v.canonical_hex).unwrap();
        let expected = blake3::hash(&bytes);
        assert_eq!(
            DatumHash::hash_bytes(&bytes).as_bytes(),
            expected.as_bytes(),
            "hash mismatch for {}",
            v.name
        );
    }
}

#[test]
fn test_vectors_deterministic() {
    let a = all_vectors();
    let b = all_vectors();
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(
            Datum::new(x.value.clone()).to_canonical_bytes(),
            Datum::new(y.value.clone()).to_canonical_bytes(),
            "canonical bytes differ for {}",
            x.name
        );
    }
}

#[test]
fn print_golden_vectors_json() {
    #[derive(Serialize, Deserialize)]
    struct VectorFile {
        version: String,
        format: String,
        vectors: Vec<VectorRecord>,
    }

    let file = VectorFile {
        version: "0.1.0".to_string(),
        format: "datum-cbor/v1".to_string(),
        vectors: all_vectors().iter().map(VectorRecord::from).collect(),
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);

    let parsed: VectorFile = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.vectors.len(), all_vectors().len());
    assert_eq!(parsed.format, "datum-cbor/v1");
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_constructor_decodes_by_registered_shape() {
    let codec = codec();
    let bytes = codec.encode(&Datum::new(fixtures::answer_constructor()));

    let int: Option<IntHolder> = codec.decode_as(&bytes).unwrap();
    assert_eq!(int.map(|h| h.value), Some(42.into()));

    let raw: Option<BytesHolder> = codec.decode_as(&bytes).unwrap();
    assert_eq!(raw, None);

    assert!(matches!(
        codec.decode_as_strict::<BytesHolder>(&bytes),
        Err(Error::Shape(_))
    ));
}

#[test]
fn test_sequence_order_matters() {
    let (a, b) = fixtures::swapped_sequences();
    assert_ne!(a, b);
    assert_ne!(a.hash(), b.hash());
    assert!(a < b);
}

#[test]
fn test_escrow_state_through_hash_slot() {
    let codec = codec();
    let state = fixtures::sample_escrow();
    let datum = Datum::from_typed(&state);
    let bytes = codec.encode(&datum);

    let slot = OutputDatum::Hash(codec.hash(&datum));
    assert!(slot.matches(&datum));

    let resolved = codec.resolve(&slot, Some(bytes.as_slice())).unwrap().unwrap();
    let decoded: EscrowState = codec.decode_as_strict(&resolved.to_canonical_bytes()).unwrap();
    assert_eq!(decoded, state);
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that malformed inputs are properly rejected.
// =============================================================================

fn assert_malformed(hex_input: &str, what: &str) {
    let bytes = hex::decode(hex_input).unwrap();
    assert!(
        matches!(codec().decode(&bytes), Err(Error::Malformed(_))),
        "must reject {}",
        what
    );
}

#[test]
fn test_reject_malformed_inputs() {
    assert_malformed("", "empty input");
    assert_malformed("1805", "non-shortest integer head");
    assert_malformed("9f01ff", "indefinite-length sequence");
    assert_malformed("0102", "trailing bytes");
    assert_malformed("6161", "text string");
    assert_malformed("f6", "null");
    assert_malformed("c24105", "bignum that fits in 64 bits");
    assert_malformed("d866820580", "general constructor form for a compact tag");
    assert_malformed("5affffffff", "byte string longer than the input");
}

#[test]
fn test_reject_trailing_bytes_exact() {
    assert!(matches!(
        codec().decode(&[0x00, 0x00]),
        Err(Error::Malformed(DecodeError::TrailingBytes { count: 1 }))
    ));
}

#[test]
fn test_reject_deep_nesting() {
    let codec = codec();
    let mut bytes = vec![0x81; 300];
    bytes.push(0x00);
    assert!(matches!(
        codec.decode(&bytes),
        Err(Error::Malformed(DecodeError::DepthLimitExceeded { limit: 256 }))
    ));
}

#[test]
fn test_reject_hash_mismatch() {
    let codec = codec();
    let (a, b) = fixtures::swapped_sequences();
    let slot = OutputDatum::Hash(a.hash());
    assert!(matches!(
        codec.resolve(&slot, Some(b.to_canonical_bytes().as_slice())),
        Err(Error::HashMismatch { .. })
    ));
}

proptest! {
    #[test]
    fn test_codec_roundtrip(d in any_datum()) {
        let codec = codec();
        let bytes = codec.encode(&d);
        prop_assert_eq!(codec.decode(&bytes).unwrap(), d.clone());
        prop_assert_eq!(DatumHash::hash_bytes(&bytes), codec.hash(&d));
    }

    #[test]
    fn test_codec_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = codec().decode(&bytes);
    }
}
