//! Sample registered types and values.
//!
//! Small domain types wired through `data_codec!`, used by the property tests
//! and by integration tests that need something to decode into.

use std::collections::BTreeMap;

use datum_core::{data_codec, BigInt, Bytes, Data, Datum};

/// A single-field record holding an integer (constructor 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntHolder {
    pub value: BigInt,
}

data_codec! {
    struct IntHolder { value } = 0;
}

/// A single-field record holding a byte string (constructor 0).
///
/// Same constructor tag and arity as [`IntHolder`]; only the field kind
/// differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesHolder {
    pub value: Bytes,
}

data_codec! {
    struct BytesHolder { value } = 0;
}

/// An escrow action, as a validator would see it in a redeemer or datum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscrowAction {
    Deposit { owner: Bytes, amount: u64 },
    Withdraw { amount: u64 },
    Cancel {},
}

data_codec! {
    enum EscrowAction {
        Deposit { owner, amount } = 0,
        Withdraw { amount } = 1,
        Cancel {} = 2,
    }
}

/// Escrow state carried in an output datum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowState {
    pub beneficiary: Bytes,
    pub deadline: i64,
    pub history: Vec<EscrowAction>,
    pub limits: Option<BTreeMap<Bytes, BigInt>>,
    pub locked: bool,
}

data_codec! {
    struct EscrowState { beneficiary, deadline, history, limits, locked } = 0;
}

/// `Constructor(0, [Integer(42)])`.
pub fn answer_constructor() -> Data {
    Data::constructor(0u64, vec![Data::integer(42)])
}

/// The two sequence datums `[1, 2]` and `[2, 1]`.
pub fn swapped_sequences() -> (Datum, Datum) {
    (
        Datum::new(Data::list(vec![Data::integer(1), Data::integer(2)])),
        Datum::new(Data::list(vec![Data::integer(2), Data::integer(1)])),
    )
}

/// A populated escrow state.
pub fn sample_escrow() -> EscrowState {
    let mut limits = BTreeMap::new();
    limits.insert(Bytes::from_static(b"daily"), BigInt::from(10_000));
    EscrowState {
        beneficiary: Bytes::from_static(&[0xbe; 28]),
        deadline: 1_736_870_400_000,
        history: vec![
            EscrowAction::Deposit {
                owner: Bytes::from_static(&[0x01; 28]),
                amount: 5_000_000,
            },
            EscrowAction::Withdraw { amount: 1_000 },
        ],
        limits: Some(limits),
        locked: false,
    }
}
