//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements a strict subset of RFC 8949 ("datum-cbor/v1"):
//! - Integers use the smallest valid head; magnitudes beyond 64 bits use
//!   bignum tags 2/3 over a big-endian byte string with no leading zeros
//! - Definite lengths only
//! - Map entries are written in stored order, never re-sorted
//! - Constructor tags 0..=6 use CBOR tags 121..=127, tags 7..=127 use
//!   1280..=1400, anything larger uses tag 102 over `[tag, fields]`
//! - No text strings, floats, or simple values
//!
//! Decoding accepts exactly what the encoder produces, so every accepted byte
//! string has a single decoded value and vice versa.
//!
//! **CRITICAL**: This encoding is FROZEN. Changes break every stored hash.

use bytes::Bytes;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

use crate::error::DecodeError;
use crate::value::Data;

/// CBOR major types.
mod major {
    pub const UNSIGNED: u8 = 0;
    pub const NEGATIVE: u8 = 1;
    pub const BYTES: u8 = 2;
    pub const ARRAY: u8 = 4;
    pub const MAP: u8 = 5;
    pub const TAG: u8 = 6;
}

/// CBOR tags used by the format.
mod tags {
    pub const POSITIVE_BIGNUM: u64 = 2;
    pub const NEGATIVE_BIGNUM: u64 = 3;
    pub const CONSTR_GENERAL: u64 = 102;
    pub const CONSTR_SMALL_BASE: u64 = 121;
    pub const CONSTR_SMALL_LAST: u64 = 127;
    pub const CONSTR_LARGE_BASE: u64 = 1280;
    pub const CONSTR_LARGE_LAST: u64 = 1400;
}

/// Constructor tags with a compact CBOR tag.
const COMPACT_SMALL_MAX: u64 = 6;
const COMPACT_LARGE_MAX: u64 = 127;

/// Default container nesting ceiling for untrusted input.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while decoding.
///
/// Decoding recurses once per nested container, so the depth ceiling also
/// bounds native stack use on attacker-controlled input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of nested containers (lists, maps, constructors).
    pub max_depth: usize,
}

impl DecodeLimits {
    /// No depth ceiling. Only for trusted input.
    pub const fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Encode a value to canonical bytes.
pub fn serialize(data: &Data) -> Vec<u8> {
    let mut buf = Vec::new();
    serialize_into(&mut buf, data);
    buf
}

/// Append the canonical encoding of a value to `buf`.
pub fn serialize_into(buf: &mut Vec<u8>, data: &Data) {
    encode_value(buf, data);
}

/// Decode canonical bytes with the default limits.
pub fn deserialize(bytes: &[u8]) -> Result<Data, DecodeError> {
    deserialize_with(bytes, &DecodeLimits::default())
}

/// Decode canonical bytes. The input must hold exactly one value.
pub fn deserialize_with(bytes: &[u8], limits: &DecodeLimits) -> Result<Data, DecodeError> {
    let mut decoder = Decoder {
        bytes,
        pos: 0,
        max_depth: limits.max_depth,
    };
    let value = decoder.decode_value(0)?;
    let remaining = bytes.len() - decoder.pos;
    if remaining != 0 {
        return Err(DecodeError::TrailingBytes { count: remaining });
    }
    Ok(value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Recursively encode a value.
fn encode_value(buf: &mut Vec<u8>, data: &Data) {
    match data {
        Data::Integer(n) => encode_integer(buf, n),
        Data::Bytes(b) => encode_bytes(buf, b),
        Data::List(items) => encode_array(buf, items),
        Data::Map(entries) => encode_map(buf, entries),
        Data::Constructor { tag, fields } => encode_constructor(buf, tag, fields),
    }
}

/// Encode an integer (major types 0 and 1, or bignum tags 2 and 3).
fn encode_integer(buf: &mut Vec<u8>, n: &BigInt) {
    if n.sign() == Sign::Minus {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let magnitude = BigInt::from(-1) - n;
        match magnitude.to_u64() {
            Some(m) => encode_uint(buf, major::NEGATIVE, m),
            None => {
                encode_uint(buf, major::TAG, tags::NEGATIVE_BIGNUM);
                encode_bytes(buf, &magnitude.magnitude().to_bytes_be());
            }
        }
    } else {
        match n.to_u64() {
            Some(v) => encode_uint(buf, major::UNSIGNED, v),
            None => {
                encode_uint(buf, major::TAG, tags::POSITIVE_BIGNUM);
                encode_bytes(buf, &n.magnitude().to_bytes_be());
            }
        }
    }
}

/// Encode a head with the given major type and smallest argument encoding.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, major::BYTES, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, items: &[Data]) {
    encode_uint(buf, major::ARRAY, items.len() as u64);
    for item in items {
        encode_value(buf, item);
    }
}

/// Encode a map (major type 5) in stored entry order.
fn encode_map(buf: &mut Vec<u8>, entries: &[(Data, Data)]) {
    encode_uint(buf, major::MAP, entries.len() as u64);
    for (k, v) in entries {
        encode_value(buf, k);
        encode_value(buf, v);
    }
}

/// Encode a constructor using the most compact tag form available.
fn encode_constructor(buf: &mut Vec<u8>, tag: &BigUint, fields: &[Data]) {
    match tag.to_u64() {
        Some(t) if t <= COMPACT_SMALL_MAX => {
            encode_uint(buf, major::TAG, tags::CONSTR_SMALL_BASE + t);
            encode_array(buf, fields);
        }
        Some(t) if t <= COMPACT_LARGE_MAX => {
            encode_uint(buf, major::TAG, tags::CONSTR_LARGE_BASE + (t - 7));
            encode_array(buf, fields);
        }
        _ => {
            encode_uint(buf, major::TAG, tags::CONSTR_GENERAL);
            encode_uint(buf, major::ARRAY, 2);
            encode_integer(buf, &BigInt::from(tag.clone()));
            encode_array(buf, fields);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// A decoded head: major type, argument, and the offset it started at.
struct Head {
    major: u8,
    arg: u64,
    offset: usize,
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn eof(&self) -> DecodeError {
        DecodeError::UnexpectedEof {
            offset: self.bytes.len(),
        }
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.bytes.get(self.pos).ok_or_else(|| self.eof())?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read `len` raw bytes. The length is checked against the input before
    /// anything is allocated.
    fn read_slice(&mut self, len: u64) -> Result<&'a [u8], DecodeError> {
        let len = usize::try_from(len).map_err(|_| self.eof())?;
        if len > self.remaining() {
            return Err(self.eof());
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_be(&mut self, width: usize) -> Result<u64, DecodeError> {
        let slice = self.read_slice(width as u64)?;
        Ok(slice.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    /// Read a head, rejecting reserved, indefinite, and non-shortest forms.
    fn read_head(&mut self) -> Result<Head, DecodeError> {
        let offset = self.pos;
        let initial = self.read_byte()?;
        let major = initial >> 5;
        let info = initial & 0x1f;

        let (arg, floor) = match info {
            0..=23 => (u64::from(info), 0),
            24 => (self.read_be(1)?, 24),
            25 => (self.read_be(2)?, 0x100),
            26 => (self.read_be(4)?, 0x1_0000),
            27 => (self.read_be(8)?, 0x1_0000_0000),
            31 if (major::BYTES..=major::MAP).contains(&major) => {
                return Err(DecodeError::IndefiniteLength { offset });
            }
            _ => {
                return Err(DecodeError::InvalidHead {
                    byte: initial,
                    offset,
                });
            }
        };

        if arg < floor {
            return Err(DecodeError::NonCanonical {
                reason: "argument not in shortest form",
                offset,
            });
        }

        Ok(Head { major, arg, offset })
    }

    /// Step one container level deeper.
    fn enter(&self, depth: usize) -> Result<usize, DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(depth + 1)
    }

    fn decode_value(&mut self, depth: usize) -> Result<Data, DecodeError> {
        let head = self.read_head()?;
        match head.major {
            major::UNSIGNED => Ok(Data::Integer(BigInt::from(head.arg))),
            major::NEGATIVE => Ok(Data::Integer(BigInt::from(-1) - BigInt::from(head.arg))),
            major::BYTES => {
                let slice = self.read_slice(head.arg)?;
                Ok(Data::Bytes(Bytes::copy_from_slice(slice)))
            }
            major::ARRAY => {
                let depth = self.enter(depth)?;
                Ok(Data::List(self.decode_items(head.arg, depth)?))
            }
            major::MAP => {
                let depth = self.enter(depth)?;
                self.decode_map(head.arg, depth)
            }
            major::TAG => self.decode_tagged(head, depth),
            other => Err(DecodeError::UnsupportedMajorType {
                major: other,
                offset: head.offset,
            }),
        }
    }

    /// Decode `count` array items at the given (already entered) depth.
    fn decode_items(&mut self, count: u64, depth: usize) -> Result<Vec<Data>, DecodeError> {
        // Every item takes at least one byte.
        if count > self.remaining() as u64 {
            return Err(self.eof());
        }
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            items.push(self.decode_value(depth)?);
        }
        Ok(items)
    }

    fn decode_map(&mut self, count: u64, depth: usize) -> Result<Data, DecodeError> {
        // Every entry takes at least two bytes.
        if count.saturating_mul(2) > self.remaining() as u64 {
            return Err(self.eof());
        }
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let key = self.decode_value(depth)?;
            let value = self.decode_value(depth)?;
            entries.push((key, value));
        }
        Ok(Data::Map(entries))
    }

    fn decode_tagged(&mut self, head: Head, depth: usize) -> Result<Data, DecodeError> {
        match head.arg {
            tags::POSITIVE_BIGNUM => {
                let magnitude = self.decode_bignum_magnitude()?;
                Ok(Data::Integer(BigInt::from(magnitude)))
            }
            tags::NEGATIVE_BIGNUM => {
                let magnitude = self.decode_bignum_magnitude()?;
                Ok(Data::Integer(BigInt::from(-1) - BigInt::from(magnitude)))
            }
            t @ tags::CONSTR_SMALL_BASE..=tags::CONSTR_SMALL_LAST => {
                let depth = self.enter(depth)?;
                let fields = self.decode_fields(depth)?;
                Ok(Data::constructor(t - tags::CONSTR_SMALL_BASE, fields))
            }
            t @ tags::CONSTR_LARGE_BASE..=tags::CONSTR_LARGE_LAST => {
                let depth = self.enter(depth)?;
                let fields = self.decode_fields(depth)?;
                Ok(Data::constructor(t - tags::CONSTR_LARGE_BASE + 7, fields))
            }
            tags::CONSTR_GENERAL => {
                let depth = self.enter(depth)?;
                self.decode_general_constructor(depth)
            }
            tag => Err(DecodeError::UnsupportedTag {
                tag,
                offset: head.offset,
            }),
        }
    }

    /// Read the byte string behind a bignum tag. It must not fit in 64 bits
    /// and must not carry leading zero bytes.
    fn decode_bignum_magnitude(&mut self) -> Result<BigUint, DecodeError> {
        let head = self.read_head()?;
        if head.major != major::BYTES {
            return Err(DecodeError::UnexpectedItem {
                expected: "byte string after bignum tag",
                offset: head.offset,
            });
        }
        let digits = self.read_slice(head.arg)?;
        if digits.first().map_or(true, |b| *b == 0) {
            return Err(DecodeError::NonCanonical {
                reason: "bignum has leading zero bytes",
                offset: head.offset,
            });
        }
        if digits.len() <= 8 {
            return Err(DecodeError::NonCanonical {
                reason: "bignum fits in 64 bits",
                offset: head.offset,
            });
        }
        Ok(BigUint::from_bytes_be(digits))
    }

    /// Read the fields array of a constructor.
    fn decode_fields(&mut self, depth: usize) -> Result<Vec<Data>, DecodeError> {
        let head = self.read_head()?;
        if head.major != major::ARRAY {
            return Err(DecodeError::UnexpectedItem {
                expected: "constructor fields array",
                offset: head.offset,
            });
        }
        self.decode_items(head.arg, depth)
    }

    /// Tag 102: `[tag, fields]` for tags without a compact form.
    fn decode_general_constructor(&mut self, depth: usize) -> Result<Data, DecodeError> {
        let head = self.read_head()?;
        if head.major != major::ARRAY || head.arg != 2 {
            return Err(DecodeError::UnexpectedItem {
                expected: "two-element constructor array",
                offset: head.offset,
            });
        }

        let tag_head = self.read_head()?;
        let tag = match tag_head.major {
            major::UNSIGNED => BigUint::from(tag_head.arg),
            major::TAG if tag_head.arg == tags::POSITIVE_BIGNUM => {
                self.decode_bignum_magnitude()?
            }
            _ => {
                return Err(DecodeError::UnexpectedItem {
                    expected: "non-negative constructor tag",
                    offset: tag_head.offset,
                });
            }
        };
        if tag <= BigUint::from(COMPACT_LARGE_MAX) {
            return Err(DecodeError::NonCanonical {
                reason: "constructor tag has a compact form",
                offset: tag_head.offset,
            });
        }

        let fields = self.decode_fields(depth)?;
        Ok(Data::Constructor { tag, fields })
    }
}
