//! Typed codecs: moving between application types and [`Data`].
//!
//! Every registered type provides three operations:
//!
//! - [`DataCodec::to_data`] is total.
//! - [`DataCodec::from_data`] is the lenient path for untrusted payloads. It
//!   returns `None` on any shape mismatch: wrong kind, wrong constructor tag,
//!   wrong arity, out-of-range integer, duplicate mapping key.
//! - [`DataCodec::from_data_strict`] is the fast path for payloads whose shape
//!   was already established. It checks only what it must touch to extract the
//!   value (for example, it does not reject surplus constructor fields) and
//!   reports a [`ShapeFault`] when the asserted shape is wrong. A shape fault
//!   is a caller logic error and should be propagated, never retried.
//!
//! Whenever a value has the correct shape both paths return the same result.
//!
//! Records and sums get all three operations from [`data_codec!`](crate::data_codec).

use bytes::Bytes;
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

use crate::error::ShapeFault;
use crate::hash::DatumHash;
use crate::value::{Data, DataKind};

/// Bidirectional mapping between a type and [`Data`].
pub trait DataCodec: Sized {
    /// Encode into a generic value. Never fails.
    fn to_data(&self) -> Data;

    /// Decode, returning `None` when the shape does not match.
    fn from_data(data: &Data) -> Option<Self>;

    /// Decode a value whose shape is already trusted.
    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Shape helpers (shared with `data_codec!`)
// ─────────────────────────────────────────────────────────────────────────────

/// Does a constructor tag equal `expected`?
pub fn tag_matches(tag: &BigUint, expected: u64) -> bool {
    tag.to_u64() == Some(expected)
}

/// Fields of a constructor with exactly this tag and arity.
pub fn constructor_fields(data: &Data, tag: u64, arity: usize) -> Option<&[Data]> {
    let (actual, fields) = data.as_constructor()?;
    (tag_matches(actual, tag) && fields.len() == arity).then_some(fields)
}

/// Tag and fields of a constructor, or a kind fault.
pub fn constructor_strict(data: &Data) -> Result<(&BigUint, &[Data]), ShapeFault> {
    data.as_constructor()
        .ok_or_else(|| wrong_kind(DataKind::Constructor, data))
}

/// Fields of a constructor with this tag. Arity is left to [`StrictFields`].
pub fn constructor_fields_strict(data: &Data, tag: u64) -> Result<&[Data], ShapeFault> {
    let (actual, fields) = constructor_strict(data)?;
    if !tag_matches(actual, tag) {
        return Err(ShapeFault::wrong_tag(tag, actual));
    }
    Ok(fields)
}

/// Fault for a constructor tag that matches none of a sum's variants.
pub fn unknown_variant(type_name: &str, tag: &BigUint) -> ShapeFault {
    ShapeFault::wrong_tag(format!("a {} variant", type_name), tag)
}

pub fn wrong_kind(expected: DataKind, found: &Data) -> ShapeFault {
    ShapeFault::WrongKind {
        expected,
        found: found.kind(),
    }
}

/// Sequential strict access to constructor fields.
pub struct StrictFields<'a> {
    fields: &'a [Data],
    tag: u64,
    index: usize,
}

impl<'a> StrictFields<'a> {
    pub fn new(fields: &'a [Data], tag: u64) -> Self {
        Self {
            fields,
            tag,
            index: 0,
        }
    }

    /// Decode the next field.
    pub fn take<T: DataCodec>(&mut self) -> Result<T, ShapeFault> {
        let field = self
            .fields
            .get(self.index)
            .ok_or_else(|| ShapeFault::MissingField {
                tag: self.tag.to_string(),
                index: self.index,
            })?;
        self.index += 1;
        T::from_data_strict(field)
    }
}

/// Implement [`DataCodec`] for a record or a sum from its constructor layout.
///
/// ```
/// use datum_core::{data_codec, BigInt, Bytes, Data, DataCodec};
///
/// #[derive(Debug, PartialEq)]
/// struct Payment {
///     amount: BigInt,
///     memo: Bytes,
/// }
///
/// data_codec! {
///     struct Payment { amount, memo } = 0;
/// }
///
/// #[derive(Debug, PartialEq)]
/// enum Action {
///     Mint { amount: u64 },
///     Burn { amount: u64, reason: Bytes },
///     Close {},
/// }
///
/// data_codec! {
///     enum Action {
///         Mint { amount } = 0,
///         Burn { amount, reason } = 1,
///         Close {} = 2,
///     }
/// }
///
/// let action = Action::Mint { amount: 5 };
/// let data = action.to_data();
/// assert_eq!(data, Data::constructor(0u64, vec![Data::integer(5)]));
/// assert_eq!(Action::from_data(&data), Some(action));
/// ```
#[macro_export]
macro_rules! data_codec {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => {
        1usize + $crate::data_codec!(@count $($tail)*)
    };

    (struct $name:ident { $($field:ident),* $(,)? } = $tag:expr;) => {
        impl $crate::DataCodec for $name {
            fn to_data(&self) -> $crate::Data {
                let tag: u64 = $tag;
                $crate::Data::constructor(
                    tag,
                    vec![$($crate::DataCodec::to_data(&self.$field)),*],
                )
            }

            #[allow(unused_mut, unused_variables)]
            fn from_data(data: &$crate::Data) -> Option<Self> {
                let tag: u64 = $tag;
                let fields = $crate::typed::constructor_fields(
                    data,
                    tag,
                    $crate::data_codec!(@count $($field)*),
                )?;
                let mut fields = fields.iter();
                Some(Self {
                    $($field: $crate::DataCodec::from_data(fields.next()?)?),*
                })
            }

            #[allow(unused_mut, unused_variables)]
            fn from_data_strict(data: &$crate::Data) -> Result<Self, $crate::ShapeFault> {
                let tag: u64 = $tag;
                let fields = $crate::typed::constructor_fields_strict(data, tag)?;
                let mut next = $crate::typed::StrictFields::new(fields, tag);
                Ok(Self {
                    $($field: next.take()?),*
                })
            }
        }
    };

    (enum $name:ident {
        $($variant:ident { $($field:ident),* $(,)? } = $tag:expr),+ $(,)?
    }) => {
        impl $crate::DataCodec for $name {
            fn to_data(&self) -> $crate::Data {
                match self {
                    $(Self::$variant { $($field),* } => {
                        let tag: u64 = $tag;
                        $crate::Data::constructor(
                            tag,
                            vec![$($crate::DataCodec::to_data($field)),*],
                        )
                    })+
                }
            }

            #[allow(unused_mut, unused_variables)]
            fn from_data(data: &$crate::Data) -> Option<Self> {
                $({
                    let tag: u64 = $tag;
                    if let Some(fields) = $crate::typed::constructor_fields(
                        data,
                        tag,
                        $crate::data_codec!(@count $($field)*),
                    ) {
                        let mut fields = fields.iter();
                        return Some(Self::$variant {
                            $($field: $crate::DataCodec::from_data(fields.next()?)?),*
                        });
                    }
                })+
                None
            }

            #[allow(unused_mut, unused_variables)]
            fn from_data_strict(data: &$crate::Data) -> Result<Self, $crate::ShapeFault> {
                let (actual, fields) = $crate::typed::constructor_strict(data)?;
                $({
                    let tag: u64 = $tag;
                    if $crate::typed::tag_matches(actual, tag) {
                        let mut next = $crate::typed::StrictFields::new(fields, tag);
                        return Ok(Self::$variant {
                            $($field: next.take()?),*
                        });
                    }
                })+
                Err($crate::typed::unknown_variant(stringify!($name), actual))
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in registrations
// ─────────────────────────────────────────────────────────────────────────────

impl DataCodec for Data {
    fn to_data(&self) -> Data {
        self.clone()
    }

    fn from_data(data: &Data) -> Option<Self> {
        Some(data.clone())
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        Ok(data.clone())
    }
}

impl DataCodec for BigInt {
    fn to_data(&self) -> Data {
        Data::Integer(self.clone())
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_integer().cloned()
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        data.as_integer()
            .cloned()
            .ok_or_else(|| wrong_kind(DataKind::Integer, data))
    }
}

macro_rules! impl_machine_int {
    ($($t:ty => $to:ident),*) => {$(
        impl DataCodec for $t {
            fn to_data(&self) -> Data {
                Data::Integer(BigInt::from(*self))
            }

            fn from_data(data: &Data) -> Option<Self> {
                data.as_integer()?.$to()
            }

            fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
                let n = data
                    .as_integer()
                    .ok_or_else(|| wrong_kind(DataKind::Integer, data))?;
                n.$to().ok_or(ShapeFault::OutOfRange {
                    target: stringify!($t),
                })
            }
        }
    )*};
}

impl_machine_int!(i64 => to_i64, u64 => to_u64, i32 => to_i32, u32 => to_u32, u8 => to_u8);

impl DataCodec for bool {
    fn to_data(&self) -> Data {
        Data::constructor(u64::from(*self), vec![])
    }

    fn from_data(data: &Data) -> Option<Self> {
        if constructor_fields(data, 0, 0).is_some() {
            Some(false)
        } else if constructor_fields(data, 1, 0).is_some() {
            Some(true)
        } else {
            None
        }
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let (tag, _) = constructor_strict(data)?;
        match tag.to_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(unknown_variant("bool", tag)),
        }
    }
}

impl DataCodec for () {
    fn to_data(&self) -> Data {
        Data::constructor(0u64, vec![])
    }

    fn from_data(data: &Data) -> Option<Self> {
        constructor_fields(data, 0, 0).map(|_| ())
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        constructor_fields_strict(data, 0).map(|_| ())
    }
}

impl DataCodec for Bytes {
    fn to_data(&self) -> Data {
        Data::Bytes(self.clone())
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_bytes().cloned()
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        data.as_bytes()
            .cloned()
            .ok_or_else(|| wrong_kind(DataKind::Bytes, data))
    }
}

impl DataCodec for DatumHash {
    fn to_data(&self) -> Data {
        Data::bytes(self.0.to_vec())
    }

    fn from_data(data: &Data) -> Option<Self> {
        DatumHash::try_from(data.as_bytes()?.as_ref()).ok()
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let bytes = data
            .as_bytes()
            .ok_or_else(|| wrong_kind(DataKind::Bytes, data))?;
        DatumHash::try_from(bytes.as_ref()).map_err(|_| ShapeFault::WrongLength {
            expected: 32,
            found: bytes.len(),
        })
    }
}

impl<T: DataCodec> DataCodec for Vec<T> {
    fn to_data(&self) -> Data {
        Data::List(self.iter().map(DataCodec::to_data).collect())
    }

    fn from_data(data: &Data) -> Option<Self> {
        data.as_list()?.iter().map(T::from_data).collect()
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        data.as_list()
            .ok_or_else(|| wrong_kind(DataKind::List, data))?
            .iter()
            .map(T::from_data_strict)
            .collect()
    }
}

impl<T: DataCodec> DataCodec for Option<T> {
    fn to_data(&self) -> Data {
        match self {
            Some(value) => Data::constructor(0u64, vec![value.to_data()]),
            None => Data::constructor(1u64, vec![]),
        }
    }

    fn from_data(data: &Data) -> Option<Self> {
        if let Some(fields) = constructor_fields(data, 0, 1) {
            return T::from_data(&fields[0]).map(Some);
        }
        constructor_fields(data, 1, 0).map(|_| None)
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let (tag, fields) = constructor_strict(data)?;
        match tag.to_u64() {
            Some(0) => StrictFields::new(fields, 0).take().map(Some),
            Some(1) => Ok(None),
            _ => Err(unknown_variant("Option", tag)),
        }
    }
}

impl<A: DataCodec, B: DataCodec> DataCodec for (A, B) {
    fn to_data(&self) -> Data {
        Data::constructor(0u64, vec![self.0.to_data(), self.1.to_data()])
    }

    fn from_data(data: &Data) -> Option<Self> {
        let fields = constructor_fields(data, 0, 2)?;
        Some((A::from_data(&fields[0])?, B::from_data(&fields[1])?))
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let mut next = StrictFields::new(constructor_fields_strict(data, 0)?, 0);
        Ok((next.take()?, next.take()?))
    }
}

impl<A: DataCodec, B: DataCodec, C: DataCodec> DataCodec for (A, B, C) {
    fn to_data(&self) -> Data {
        Data::constructor(
            0u64,
            vec![self.0.to_data(), self.1.to_data(), self.2.to_data()],
        )
    }

    fn from_data(data: &Data) -> Option<Self> {
        let fields = constructor_fields(data, 0, 3)?;
        Some((
            A::from_data(&fields[0])?,
            B::from_data(&fields[1])?,
            C::from_data(&fields[2])?,
        ))
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let mut next = StrictFields::new(constructor_fields_strict(data, 0)?, 0);
        Ok((next.take()?, next.take()?, next.take()?))
    }
}

/// Mappings decode into a `BTreeMap`; a repeated key is a shape mismatch.
/// Encoding writes entries in key order.
impl<K: DataCodec + Ord, V: DataCodec> DataCodec for BTreeMap<K, V> {
    fn to_data(&self) -> Data {
        Data::Map(
            self.iter()
                .map(|(k, v)| (k.to_data(), v.to_data()))
                .collect(),
        )
    }

    fn from_data(data: &Data) -> Option<Self> {
        let mut map = BTreeMap::new();
        for (k, v) in data.as_map()? {
            if map.insert(K::from_data(k)?, V::from_data(v)?).is_some() {
                return None;
            }
        }
        Some(map)
    }

    fn from_data_strict(data: &Data) -> Result<Self, ShapeFault> {
        let entries = data
            .as_map()
            .ok_or_else(|| wrong_kind(DataKind::Map, data))?;
        let mut map = BTreeMap::new();
        for (k, v) in entries {
            if map
                .insert(K::from_data_strict(k)?, V::from_data_strict(v)?)
                .is_some()
            {
                return Err(ShapeFault::DuplicateKey);
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    data_codec! {
        struct Point { x, y } = 0;
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Marker {}

    data_codec! {
        struct Marker {} = 9;
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Shape {
        Dot { at: Point },
        Segment { from: Point, to: Point },
        Empty {},
        Labeled { label: Bytes },
    }

    data_codec! {
        enum Shape {
            Dot { at } = 0,
            Segment { from, to } = 1,
            Empty {} = 2,
            Labeled { label } = 200,
        }
    }

    fn int(n: i64) -> Data {
        Data::integer(n)
    }

    fn both_paths<T: DataCodec + PartialEq + std::fmt::Debug + Clone>(value: T) {
        let data = value.to_data();
        assert_eq!(T::from_data(&data), Some(value.clone()));
        assert_eq!(T::from_data_strict(&data), Ok(value));
    }

    #[test]
    fn test_builtin_roundtrips() {
        both_paths(BigInt::from(u64::MAX) * BigInt::from(u64::MAX));
        both_paths(-17i64);
        both_paths(u64::MAX);
        both_paths(i32::MIN);
        both_paths(7u32);
        both_paths(255u8);
        both_paths(true);
        both_paths(false);
        both_paths(());
        both_paths(Bytes::from_static(b"payload"));
        both_paths(vec![1i64, 2, 3]);
        both_paths(Some(5u8));
        both_paths(None::<u8>);
        both_paths((1i64, Bytes::from_static(b"b")));
        both_paths((true, 2u32, vec![false]));
        both_paths(DatumHash::from_bytes([3; 32]));
        both_paths(int(4));

        let mut m = BTreeMap::new();
        m.insert(Bytes::from_static(b"a"), 1i64);
        m.insert(Bytes::from_static(b"b"), 2i64);
        both_paths(m);
    }

    #[test]
    fn test_wire_shapes() {
        assert_eq!(true.to_data(), Data::constructor(1u64, vec![]));
        assert_eq!(Some(1i64).to_data(), Data::constructor(0u64, vec![int(1)]));
        assert_eq!(None::<i64>.to_data(), Data::constructor(1u64, vec![]));
        assert_eq!(
            Point { x: 1, y: 2 }.to_data(),
            Data::constructor(0u64, vec![int(1), int(2)])
        );
    }

    #[test]
    fn test_lenient_rejects_wrong_kind() {
        assert_eq!(i64::from_data(&Data::bytes(vec![1])), None);
        assert_eq!(Bytes::from_data(&int(1)), None);
        assert_eq!(Vec::<i64>::from_data(&Data::map(vec![])), None);
        assert_eq!(Point::from_data(&Data::list(vec![int(1), int(2)])), None);
    }

    #[test]
    fn test_lenient_rejects_wrong_tag_and_arity() {
        assert_eq!(Point::from_data(&Data::constructor(1u64, vec![int(1), int(2)])), None);
        assert_eq!(Point::from_data(&Data::constructor(0u64, vec![int(1)])), None);
        assert_eq!(
            Point::from_data(&Data::constructor(0u64, vec![int(1), int(2), int(3)])),
            None
        );
        assert_eq!(bool::from_data(&Data::constructor(2u64, vec![])), None);
        assert_eq!(bool::from_data(&Data::constructor(1u64, vec![int(0)])), None);
    }

    #[test]
    fn test_lenient_rejects_out_of_range() {
        assert_eq!(u8::from_data(&int(256)), None);
        assert_eq!(u64::from_data(&int(-1)), None);
        assert_eq!(i32::from_data(&int(i64::from(i32::MAX) + 1)), None);
    }

    #[test]
    fn test_lenient_rejects_duplicate_keys() {
        let dup = Data::map(vec![(int(1), int(2)), (int(1), int(3))]);
        assert_eq!(BTreeMap::<i64, i64>::from_data(&dup), None);
        assert_eq!(
            BTreeMap::<i64, i64>::from_data_strict(&dup),
            Err(ShapeFault::DuplicateKey)
        );
    }

    #[test]
    fn test_strict_faults() {
        assert_eq!(
            i64::from_data_strict(&Data::bytes(vec![])),
            Err(ShapeFault::WrongKind {
                expected: DataKind::Integer,
                found: DataKind::Bytes,
            })
        );
        assert_eq!(
            u8::from_data_strict(&int(1000)),
            Err(ShapeFault::OutOfRange { target: "u8" })
        );
        assert!(matches!(
            Point::from_data_strict(&Data::constructor(3u64, vec![int(1), int(2)])),
            Err(ShapeFault::WrongTag { .. })
        ));
        assert_eq!(
            Point::from_data_strict(&Data::constructor(0u64, vec![int(1)])),
            Err(ShapeFault::MissingField {
                tag: "0".into(),
                index: 1,
            })
        );
        assert_eq!(
            DatumHash::from_data_strict(&Data::bytes(vec![0; 31])),
            Err(ShapeFault::WrongLength {
                expected: 32,
                found: 31,
            })
        );
    }

    #[test]
    fn test_strict_ignores_surplus_fields() {
        let data = Data::constructor(0u64, vec![int(1), int(2), int(3)]);
        assert_eq!(Point::from_data(&data), None);
        assert_eq!(Point::from_data_strict(&data), Ok(Point { x: 1, y: 2 }));
    }

    #[test]
    fn test_enum_roundtrip() {
        let p = Point { x: -1, y: 9 };
        both_paths(Shape::Dot { at: p.clone() });
        both_paths(Shape::Segment {
            from: p.clone(),
            to: Point { x: 0, y: 0 },
        });
        both_paths(Shape::Empty {});
        both_paths(Shape::Labeled {
            label: Bytes::from_static(b"tag"),
        });
        both_paths(Marker {});
    }

    #[test]
    fn test_enum_tags() {
        assert_eq!(Shape::Empty {}.to_data(), Data::constructor(2u64, vec![]));
        let labeled = Shape::Labeled {
            label: Bytes::new(),
        };
        assert_eq!(
            labeled.to_data().as_constructor().unwrap().0,
            &BigUint::from(200u64)
        );
    }

    #[test]
    fn test_enum_unknown_variant() {
        let data = Data::constructor(5u64, vec![]);
        assert_eq!(Shape::from_data(&data), None);
        assert_eq!(
            Shape::from_data_strict(&data),
            Err(ShapeFault::WrongTag {
                expected: "a Shape variant".into(),
                found: "5".into(),
            })
        );
    }

    #[test]
    fn test_nested_field_mismatch_is_absent() {
        // Dot whose point has a bytes coordinate
        let data = Data::constructor(
            0u64,
            vec![Data::constructor(0u64, vec![int(1), Data::bytes(vec![])])],
        );
        assert_eq!(Shape::from_data(&data), None);
        assert!(Shape::from_data_strict(&data).is_err());
    }
}
