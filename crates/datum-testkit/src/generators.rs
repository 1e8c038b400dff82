//! Proptest generators for datum values.

use std::collections::BTreeMap;

use datum_core::{BigInt, BigUint, Bytes, Data, Datum};
use num_bigint::Sign;
use proptest::prelude::*;

use crate::fixtures::{EscrowAction, EscrowState};

/// Generate an integer, covering machine-sized values, the 64-bit edges,
/// and magnitudes that need bignum encoding.
pub fn integer() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        4 => any::<i64>().prop_map(BigInt::from),
        2 => (any::<u64>(), any::<bool>()).prop_map(|(m, negative)| {
            let n = BigInt::from(m);
            if negative {
                -n - BigInt::from(1)
            } else {
                n
            }
        }),
        1 => (prop::collection::vec(any::<u8>(), 0..40), any::<bool>()).prop_map(
            |(magnitude, negative)| {
                let sign = if negative { Sign::Minus } else { Sign::Plus };
                BigInt::from_bytes_be(sign, &magnitude)
            }
        ),
    ]
}

/// Generate a constructor tag across the compact and general ranges.
pub fn constructor_tag() -> impl Strategy<Value = BigUint> {
    prop_oneof![
        4 => (0u64..=8).prop_map(BigUint::from),
        2 => (120u64..=140).prop_map(BigUint::from),
        1 => (1270u64..=1410).prop_map(BigUint::from),
        1 => any::<u64>().prop_map(BigUint::from),
        1 => prop::collection::vec(any::<u8>(), 9..20)
            .prop_map(|magnitude| BigUint::from_bytes_be(&magnitude)),
    ]
}

/// Generate a byte string.
pub fn byte_string(max_len: usize) -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..=max_len).prop_map(Bytes::from)
}

/// Generate an arbitrary data value, nested up to a few levels.
pub fn data() -> impl Strategy<Value = Data> {
    let leaf = prop_oneof![
        integer().prop_map(Data::Integer),
        byte_string(64).prop_map(Data::Bytes),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Data::List),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Data::Map),
            (constructor_tag(), prop::collection::vec(inner, 0..5))
                .prop_map(|(tag, fields)| Data::Constructor { tag, fields }),
        ]
    })
}

/// Generate a datum.
pub fn datum() -> impl Strategy<Value = Datum> {
    data().prop_map(Datum::new)
}

/// Generate raw bytes, most of them starting with a plausible head.
pub fn raw_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..=max_len),
        data().prop_map(|v| {
            let mut bytes = datum_core::serialize(&v);
            bytes.truncate(bytes.len().saturating_sub(1));
            bytes
        }),
    ]
}

/// Generate an escrow action.
pub fn escrow_action() -> impl Strategy<Value = EscrowAction> {
    prop_oneof![
        (byte_string(28), any::<u64>())
            .prop_map(|(owner, amount)| EscrowAction::Deposit { owner, amount }),
        any::<u64>().prop_map(|amount| EscrowAction::Withdraw { amount }),
        Just(EscrowAction::Cancel {}),
    ]
}

impl Arbitrary for EscrowState {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            byte_string(28),
            any::<i64>(),
            prop::collection::vec(escrow_action(), 0..8),
            prop::option::of(prop::collection::btree_map(
                byte_string(8),
                integer(),
                0..4,
            )),
            any::<bool>(),
        )
            .prop_map(
                |(beneficiary, deadline, history, limits, locked): (
                    Bytes,
                    i64,
                    Vec<EscrowAction>,
                    Option<BTreeMap<Bytes, BigInt>>,
                    bool,
                )| EscrowState {
                    beneficiary,
                    deadline,
                    history,
                    limits,
                    locked,
                },
            )
            .boxed()
    }
}
