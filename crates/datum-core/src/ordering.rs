//! Total order over [`Data`] trees.
//!
//! The order is defined on the logical tree only, so any two implementations
//! that agree on the tree agree on every comparison:
//!
//! 1. Kinds compare by fixed priority: `Integer < Bytes < List < Map < Constructor`.
//! 2. Integers compare numerically.
//! 3. Byte strings compare lexicographically; a proper prefix sorts first.
//! 4. Lists compare element by element, then by length.
//! 5. Maps compare as lists of `(key, value)` pairs. Entry order matters:
//!    the same pairs in a different order are a different, unequal map.
//! 6. Constructors compare by tag, then by fields as a list.
//!
//! Equality is exactly "compares equal", which coincides with the derived
//! structural `PartialEq`.

use std::cmp::Ordering;

use crate::value::Data;

impl Ord for Data {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Data::Integer(a), Data::Integer(b)) => a.cmp(b),
            (Data::Bytes(a), Data::Bytes(b)) => a.as_ref().cmp(b.as_ref()),
            (Data::List(a), Data::List(b)) => a.as_slice().cmp(b.as_slice()),
            (Data::Map(a), Data::Map(b)) => a.as_slice().cmp(b.as_slice()),
            (
                Data::Constructor {
                    tag: tag_a,
                    fields: fields_a,
                },
                Data::Constructor {
                    tag: tag_b,
                    fields: fields_b,
                },
            ) => tag_a
                .cmp(tag_b)
                .then_with(|| fields_a.as_slice().cmp(fields_b.as_slice())),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for Data {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn int(n: i64) -> Data {
        Data::integer(n)
    }

    #[test]
    fn test_kind_priority() {
        let ladder = [
            int(i64::MAX),
            Data::bytes(Vec::new()),
            Data::list(vec![]),
            Data::map(vec![]),
            Data::constructor(0u64, vec![]),
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should sort before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_integers_numeric() {
        let huge: BigInt = BigInt::from(u64::MAX) * BigInt::from(1000);
        assert!(int(-5) < int(3));
        assert!(int(i64::MAX) < Data::Integer(huge.clone()));
        assert!(Data::Integer(-huge) < int(i64::MIN));
    }

    #[test]
    fn test_bytes_lexicographic() {
        assert!(Data::bytes(b"ab".to_vec()) < Data::bytes(b"abc".to_vec()));
        assert!(Data::bytes(b"abc".to_vec()) < Data::bytes(b"b".to_vec()));
        assert!(Data::bytes(Vec::new()) < Data::bytes(vec![0u8]));
    }

    #[test]
    fn test_list_elementwise_then_length() {
        let a = Data::list(vec![int(1), int(2)]);
        let b = Data::list(vec![int(2), int(1)]);
        let c = Data::list(vec![int(1), int(2), int(0)]);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_map_order_sensitive() {
        let a = int(1);
        let b = int(2);
        let m1 = Data::map(vec![(a.clone(), b.clone()), (b.clone(), a.clone())]);
        let m2 = Data::map(vec![(b.clone(), a.clone()), (a.clone(), b.clone())]);
        assert_ne!(m1, m2);
        assert_eq!(m1.cmp(&m2), Ordering::Less);
        assert_eq!(m2.cmp(&m1), Ordering::Greater);

        let single = Data::map(vec![(a.clone(), b.clone())]);
        assert_ne!(single, m2);
        assert!(single < m1);
    }

    #[test]
    fn test_map_entry_compares_key_then_value() {
        let m1 = Data::map(vec![(int(1), int(9))]);
        let m2 = Data::map(vec![(int(2), int(0))]);
        let m3 = Data::map(vec![(int(1), int(10))]);
        assert!(m1 < m2);
        assert!(m1 < m3);
    }

    #[test]
    fn test_constructor_tag_then_fields() {
        let c0 = Data::constructor(0u64, vec![int(100)]);
        let c1 = Data::constructor(1u64, vec![]);
        let c0b = Data::constructor(0u64, vec![int(100), int(0)]);
        assert!(c0 < c1);
        assert!(c0 < c0b);
        assert!(c0b < c1);
    }

    #[test]
    fn test_equality_matches_ordering() {
        let x = Data::constructor(7u64, vec![Data::list(vec![int(1)]), Data::bytes(vec![1, 2])]);
        let y = x.clone();
        assert_eq!(x.cmp(&y), Ordering::Equal);
        assert_eq!(x, y);
    }
}
