#![cfg(test)]

// Property tests for DynArray: state-machine equivalence against Vec plus the
// capacity policy.

use crate::dyn_array::DynArray;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(i16),
    Pop,
    Insert(usize, i16),
    Remove(usize),
    Set(usize, i16),
    Get(usize),
    Clear,
}

// Indices range past the current length on purpose so out-of-range paths are
// exercised as often as in-range ones.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i16>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        2 => (0usize..24, any::<i16>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0usize..24).prop_map(Op::Remove),
        2 => (0usize..24, any::<i16>()).prop_map(|(i, v)| Op::Set(i, v)),
        1 => (0usize..24).prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

/// Every capacity the growth policy can produce from `start`: `start * 2^k`,
/// or `0` and `2^k` when starting empty.
fn reachable_capacity(start: usize, capacity: usize) -> bool {
    if start == 0 {
        capacity == 0 || capacity.is_power_of_two()
    } else {
        capacity % start == 0 && (capacity / start).is_power_of_two()
    }
}

// Property: DynArray mirrors Vec under random mutation, with the sentinel
// standing in for every read that has no element. Capacity only ever takes
// values on the doubling ladder from the starting capacity and never drops.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_vec(start in 0usize..6, ops in proptest::collection::vec(arb_op(), 1..120)) {
        const EMPTY: i16 = i16::MIN;
        let mut sut = DynArray::with_sentinel(start, EMPTY).unwrap();
        let mut model: Vec<i16> = Vec::new();

        for op in ops {
            let cap_before = sut.capacity();
            match op {
                Op::Push(v) => {
                    sut.push_back(v).unwrap();
                    model.push(v);
                }
                Op::Pop => {
                    prop_assert_eq!(sut.pop_back(), model.pop().unwrap_or(EMPTY));
                }
                Op::Insert(i, v) => {
                    let res = sut.insert(i, v);
                    if i <= model.len() {
                        prop_assert!(res.is_ok());
                        model.insert(i, v);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Remove(i) => {
                    let expected = (i < model.len()).then(|| model.remove(i));
                    prop_assert_eq!(sut.remove(i), expected);
                }
                Op::Set(i, v) => {
                    let ok = sut.set(i, v);
                    prop_assert_eq!(ok, i < model.len());
                    if ok {
                        model[i] = v;
                        prop_assert_eq!(sut.get(i), v);
                    }
                }
                Op::Get(i) => {
                    prop_assert_eq!(sut.get(i), model.get(i).copied().unwrap_or(EMPTY));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
            }

            prop_assert_eq!(sut.as_slice(), model.as_slice());
            prop_assert!(sut.capacity() >= sut.len());
            prop_assert!(sut.capacity() >= cap_before);
            prop_assert!(reachable_capacity(start, sut.capacity()),
                "capacity {} not reachable from {}", sut.capacity(), start);
        }
    }
}

// Property: after n pushes from capacity c0 > 0 the capacity is the smallest
// c0 * 2^k that holds n elements.
proptest! {
    #[test]
    fn prop_push_capacity_is_smallest_doubling(start in 1usize..9, n in 0usize..300) {
        let mut sut = DynArray::with_capacity(start).unwrap();
        for v in 0..n {
            sut.push_back(v).unwrap();
        }
        let mut expected = start;
        while expected < n {
            expected *= 2;
        }
        prop_assert_eq!(sut.capacity(), expected);
    }
}

// Property: insert(i, v) followed by remove(i) leaves the sequence unchanged
// for every valid i.
proptest! {
    #[test]
    fn prop_insert_then_remove_is_identity(
        values in proptest::collection::vec(any::<i32>(), 0..40),
        pick in any::<proptest::sample::Index>(),
        v in any::<i32>(),
    ) {
        let mut sut = DynArray::from(values.clone());
        let i = pick.index(values.len() + 1);
        sut.insert(i, v).unwrap();
        prop_assert_eq!(sut.get(i), v);
        prop_assert_eq!(sut.remove(i), Some(v));
        prop_assert_eq!(sut.as_slice(), values.as_slice());
    }
}
