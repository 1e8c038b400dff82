//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the exact canonical bytes and content hash of one value.
//! Any implementation of the encoding must reproduce these byte for byte.

use datum_core::{deserialize, serialize, BigInt, Data, DatumHash};
use serde::{Deserialize, Serialize};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Short identifier.
    pub name: &'static str,
    /// What the vector exercises.
    pub description: &'static str,
    /// The value under test.
    pub value: Data,
    /// Expected canonical bytes (hex).
    pub canonical_hex: &'static str,
    /// Expected content hash (hex).
    pub hash_hex: &'static str,
}

/// Serializable form of a vector, for exporting to other implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub name: String,
    pub description: String,
    pub canonical_hex: String,
    pub hash_hex: String,
}

impl From<&GoldenVector> for VectorRecord {
    fn from(v: &GoldenVector) -> Self {
        Self {
            name: v.name.to_string(),
            description: v.description.to_string(),
            canonical_hex: v.canonical_hex.to_string(),
            hash_hex: v.hash_hex.to_string(),
        }
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let two_pow_64 = BigInt::from(u64::MAX) + BigInt::from(1);
    vec![
        GoldenVector {
            name: "integer_zero",
            description: "zero as a single head byte",
            value: Data::integer(0),
            canonical_hex: "00",
            hash_hex: "2d3adedff11b61f14c886e35afa036736dcd87a74d27b5c1510225d0f592e213",
        },
        GoldenVector {
            name: "integer_negative",
            description: "-1000 with a two-byte argument",
            value: Data::integer(-1000),
            canonical_hex: "3903e7",
            hash_hex: "b49e8a2a25abb735df264b4bf17f9986dc75ca45283c51b6a2f51db0425a50c4",
        },
        GoldenVector {
            name: "bignum_positive",
            description: "2^64, the smallest positive bignum",
            value: Data::Integer(two_pow_64.clone()),
            canonical_hex: "c249010000000000000000",
            hash_hex: "14ac67b62700784877afc62bd4cffbdf043c89632a334a472d70b54d5fabb4cd",
        },
        GoldenVector {
            name: "bignum_negative",
            description: "-(2^64) - 1, the largest negative bignum",
            value: Data::Integer(-two_pow_64 - BigInt::from(1)),
            canonical_hex: "c349010000000000000000",
            hash_hex: "7f6001351b78e0a79ca90fe9e6c1495ff69487fcfed89672abef4f51a6927abc",
        },
        GoldenVector {
            name: "bytes_empty",
            description: "empty byte string",
            value: Data::bytes(Vec::new()),
            canonical_hex: "40",
            hash_hex: "9744d9dc6389e67986afa563f19f133b28385319ebba2266adfd97d9c6536423",
        },
        GoldenVector {
            name: "bytes_hello",
            description: "short byte string",
            value: Data::bytes(b"hello".to_vec()),
            canonical_hex: "4568656c6c6f",
            hash_hex: "1fef6bd7ca570274cfb726569e4d800d02b5eca5e8f3fe388103b1538eae601a",
        },
        GoldenVector {
            name: "list_one_two",
            description: "sequence [1, 2]",
            value: Data::list(vec![Data::integer(1), Data::integer(2)]),
            canonical_hex: "820102",
            hash_hex: "bce8892674c3c260adc1237a33742977a72699b355cba4b7a4378b284b1a7994",
        },
        GoldenVector {
            name: "list_two_one",
            description: "sequence [2, 1], distinct from [1, 2]",
            value: Data::list(vec![Data::integer(2), Data::integer(1)]),
            canonical_hex: "820201",
            hash_hex: "2f0bad7aebb0ef6bc2e27f73cbf1b1460d0ce938f70459febe79c243dee514be",
        },
        GoldenVector {
            name: "map_ordered",
            description: "mapping entries kept in stored order, not key order",
            value: Data::map(vec![
                (Data::integer(1), Data::integer(2)),
                (Data::integer(0), Data::integer(3)),
            ]),
            canonical_hex: "a201020003",
            hash_hex: "07c9ef5d4e6ebce95019159c6a867d5664c9c590a64719272a349b71200b5373",
        },
        GoldenVector {
            name: "constr0",
            description: "constructor 0 with one integer field",
            value: Data::constructor(0u64, vec![Data::integer(42)]),
            canonical_hex: "d87981182a",
            hash_hex: "70696ebe6f5649a74352cfeabf788a994d3ded8087b135fc607974d5388c5ab7",
        },
        GoldenVector {
            name: "constr7",
            description: "constructor 7, first tag of the extended compact range",
            value: Data::constructor(7u64, vec![]),
            canonical_hex: "d9050080",
            hash_hex: "e2bfe277943c214fd2fe2fd807c7e888b46fcdcf4a067f93389e9658427991ad",
        },
        GoldenVector {
            name: "constr200",
            description: "constructor 200 in the general form",
            value: Data::constructor(200u64, vec![Data::integer(1)]),
            canonical_hex: "d8668218c88101",
            hash_hex: "d3cff3bcd46984a2e68349930a121aaff9eb5f1bda47119730e6a9601206693b",
        },
        GoldenVector {
            name: "nested",
            description: "constructor holding a mapping of bytes to a sequence",
            value: Data::constructor(
                1u64,
                vec![
                    Data::map(vec![(
                        Data::bytes(b"k".to_vec()),
                        Data::list(vec![Data::integer(-1)]),
                    )]),
                    Data::bytes(Vec::new()),
                ],
            ),
            canonical_hex: "d87a82a1416b812040",
            hash_hex: "332e6cc9b0c5f2b2dc366f05ec5c508029e2a948289eeb07ad4df841c5cad6d0",
        },
    ]
}

/// Verify a single vector, returning a description of the first mismatch.
pub fn verify_vector(vector: &GoldenVector) -> Result<(), String> {
    let bytes = serialize(&vector.value);
    let actual_hex = hex::encode(&bytes);
    if actual_hex != vector.canonical_hex {
        return Err(format!(
            "{}: canonical bytes {} != expected {}",
            vector.name, actual_hex, vector.canonical_hex
        ));
    }

    let hash = DatumHash::of(&vector.value).to_hex();
    if hash != vector.hash_hex {
        return Err(format!(
            "{}: hash {} != expected {}",
            vector.name, hash, vector.hash_hex
        ));
    }

    match deserialize(&bytes) {
        Ok(decoded) if decoded == vector.value => Ok(()),
        Ok(_) => Err(format!("{}: decoded value differs", vector.name)),
        Err(e) => Err(format!("{}: decode failed: {}", vector.name, e)),
    }
}

/// Verify every vector.
pub fn verify_all_vectors() -> Result<(), Vec<String>> {
    let failures: Vec<String> = all_vectors()
        .iter()
        .filter_map(|v| verify_vector(v).err())
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

/// Export all vectors as pretty JSON.
pub fn export_json() -> serde_json::Result<String> {
    let records: Vec<VectorRecord> = all_vectors().iter().map(VectorRecord::from).collect();
    serde_json::to_string_pretty(&records)
}
