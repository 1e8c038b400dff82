//! Datum: the opaque payload attached to a ledger output.
//!
//! A [`Datum`] wraps exactly one [`Data`] and does nothing else with it.
//! Equality, ordering, and hashing delegate to the wrapped value; decoding it
//! into a domain type is the validator's job, through [`DataCodec`].

use num_traits::ToPrimitive;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::{deserialize_with, serialize, DecodeLimits};
use crate::error::{DecodeError, ShapeFault};
use crate::hash::DatumHash;
use crate::typed::{
    constructor_fields, constructor_strict, unknown_variant, DataCodec, StrictFields,
};
use crate::value::Data;

/// An opaque payload carrying one generic value.
///
/// Serializes (serde) as the hex string of its canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Datum(Data);

impl Datum {
    /// Wrap a value. No normalization is applied.
    pub fn new(data: Data) -> Self {
        Self(data)
    }

    /// Wrap the generic form of a typed value.
    pub fn from_typed<T: DataCodec>(value: &T) -> Self {
        Self(value.to_data())
    }

    /// The wrapped value, exactly as passed to [`Datum::new`].
    pub fn as_data(&self) -> &Data {
        &self.0
    }

    pub fn into_data(self) -> Data {
        self.0
    }

    /// Content hash of the wrapped value.
    pub fn hash(&self) -> DatumHash {
        DatumHash::of(&self.0)
    }

    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        serialize(&self.0)
    }

    /// Decode a datum from canonical bytes with the default limits.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_canonical_bytes_with(bytes, &DecodeLimits::default())
    }

    pub fn from_canonical_bytes_with(
        bytes: &[u8],
        limits: &DecodeLimits,
    ) -> Result<Self, DecodeError> {
        deserialize_with(bytes, limits).map(Self)
    }
}

impl From<Data> for Datum {
    fn from(data: Data) -> Self {
        Self(data)
    }
}

impl From<Datum> for Data {
    fn from(datum: Datum) -> Self {
        datum.0
    }
}

impl AsRef<Data> for Datum {
    fn as_ref(&self) -> &Data {
        &self.0
    }
}

impl DataCodec for Datum {
    fn to_data(&self) -> Data {
        self.0.clone()
    }

    fn from_data(data: &Data) -> Option<Self> {
        Some(Self(data.clone()))
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        Ok(Self(data.clone()))
    }
}

impl Serialize for Datum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.to_canonical_bytes()))
    }
}

impl<'de> Deserialize<'de> for Datum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(de::Error::custom)?;
        Datum::from_canonical_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// What a ledger output carries in its datum slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OutputDatum {
    /// No datum.
    #[default]
    None,
    /// Only the hash; the datum itself is supplied separately.
    Hash(DatumHash),
    /// The datum is stored inline.
    Inline(Datum),
}

impl OutputDatum {
    /// The hash this slot refers to, if any. Inline datums are hashed.
    pub fn hash(&self) -> Option<DatumHash> {
        match self {
            OutputDatum::None => None,
            OutputDatum::Hash(hash) => Some(*hash),
            OutputDatum::Inline(datum) => Some(datum.hash()),
        }
    }

    /// The inline datum, if stored inline.
    pub fn inline(&self) -> Option<&Datum> {
        match self {
            OutputDatum::Inline(datum) => Some(datum),
            _ => None,
        }
    }

    /// Does `datum` satisfy this slot?
    ///
    /// A hash slot matches any datum with that content hash; an inline slot
    /// matches only an equal datum; an empty slot matches nothing.
    pub fn matches(&self, datum: &Datum) -> bool {
        match self {
            OutputDatum::None => false,
            OutputDatum::Hash(hash) => datum.hash() == *hash,
            OutputDatum::Inline(inline) => inline == datum,
        }
    }
}

/// Wire shape: `None` = 0 [], `Hash` = 1 [bytes], `Inline` = 2 [datum].
impl DataCodec for OutputDatum {
    fn to_data(&self) -> Data {
        match self {
            OutputDatum::None => Data::constructor(0u64, vec![]),
            OutputDatum::Hash(hash) => Data::constructor(1u64, vec![hash.to_data()]),
            OutputDatum::Inline(datum) => Data::constructor(2u64, vec![datum.to_data()]),
        }
    }

    fn from_data(data: &Data) -> Option<Self> {
        if constructor_fields(data, 0, 0).is_some() {
            return Some(OutputDatum::None);
        }
        if let Some(fields) = constructor_fields(data, 1, 1) {
            return DatumHash::from_data(&fields[0]).map(OutputDatum::Hash);
        }
        let fields = constructor_fields(data, 2, 1)?;
        Datum::from_data(&fields[0]).map(OutputDatum::Inline)
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let (tag, fields) = constructor_strict(data)?;
        match tag.to_u64() {
            Some(0) => Ok(OutputDatum::None),
            Some(1) => StrictFields::new(fields, 1).take().map(OutputDatum::Hash),
            Some(2) => StrictFields::new(fields, 2).take().map(OutputDatum::Inline),
            _ => Err(unknown_variant("OutputDatum", tag)),
        }
    }
}
