#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check the
// slot-level invariants through `assert_invariants`.

use crate::hash::{fnv1a_str, StdEq};
use crate::hash_table::HashTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Erase(usize),
    Find(usize),
    Mutate(usize, i32),
    Rehash(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Erase),
            2 => idx.clone().prop_map(OpI::Find),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (0usize..40).prop_map(OpI::Rehash),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Runs one scenario against `sut`, using std::collections::HashMap as the model.
// Invariants checked after every op:
// - `len()` equals the model size and the number of occupied slots.
// - Every live entry is reachable from its home slot before any free slot.
// - Capacity is a power of two and never drops below its previous value.
// - `find` agrees with the model for every pool key.
fn run_scenario<E, H>(
    mut sut: HashTable<String, i32, E, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    E: crate::hash::KeyEq<String>,
    H: crate::hash::KeyHash<String>,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        let cap_before = sut.capacity();
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v).expect("allocation");
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Erase(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.erase(k), model.remove(k));
            }
            OpI::Find(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.find(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.find_mut(k), model.get_mut(k)) {
                    (Some(s), Some(m)) => {
                        *s = s.wrapping_add(d);
                        *m = m.wrapping_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Rehash(n) => {
                let len_before = sut.len();
                sut.rehash(n).expect("allocation");
                prop_assert_eq!(sut.tombstones(), 0);
                prop_assert_eq!(sut.len(), len_before);
                prop_assert!(sut.capacity() >= n.max(1));
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap_before);
            }
            OpI::Iterate => {
                let seen: BTreeMap<&String, &i32> = sut.iter().collect();
                prop_assert_eq!(seen.len(), sut.iter().count(), "no key visited twice");
                let expected: BTreeMap<&String, &i32> = model.iter().collect();
                prop_assert_eq!(seen, expected);
            }
        }

        sut.assert_invariants();
        prop_assert!(sut.capacity() >= cap_before, "capacity never shrinks");
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        for k in pool {
            prop_assert_eq!(sut.find(k), model.get(k));
        }
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap with
// a well-distributed hash (FNV-1a) and a small starting capacity, so growth
// happens often.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), start in 0usize..5) {
        let sut = HashTable::new(
            start,
            |a: &String, b: &String| a == b,
            |k: &String| fnv1a_str(k),
        );
        run_scenario(sut, &pool, ops)?;
    }
}

// Property: Same invariants under worst-case collisions (constant hash). Every
// key shares one home slot, which stresses tombstone skipping, first-tombstone
// reuse and full-cycle termination.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), start in 0usize..5) {
        let sut = HashTable::new(start, StdEq, |_: &String| 0u64);
        run_scenario(sut, &pool, ops)?;
    }
}

// Property: Integer keys drawn from a tiny domain that includes zero, with an
// identity hash so keys collide in clusters. Interleaves inserts and erases
// so tombstones pile up between rehashes.
proptest! {
    #[test]
    fn prop_small_int_keys(ops in proptest::collection::vec((any::<bool>(), 0u64..16, any::<u8>()), 1..200)) {
        let identity: fn(&u64) -> u64 = |k| *k;
        let mut sut = HashTable::new(2, StdEq, identity);
        let mut model: HashMap<u64, u8> = HashMap::new();
        for (insert, k, v) in ops {
            if insert {
                prop_assert_eq!(sut.insert(k, v).expect("allocation"), model.insert(k, v));
            } else {
                prop_assert_eq!(sut.erase(&k), model.remove(&k));
            }
            sut.assert_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.find(&0), model.get(&0));
        }
        let mut entries: Vec<(u64, u8)> = sut.into_iter().collect();
        entries.sort_unstable();
        let mut expected: Vec<(u64, u8)> = model.into_iter().collect();
        expected.sort_unstable();
        prop_assert_eq!(entries, expected);
    }
}

// Property: Starting from capacity 2, inserting `0.75 * capacity + 1` distinct
// keys always grows the table, and every key keeps its original value.
proptest! {
    #[test]
    fn prop_growth_preserves_values(keys in proptest::collection::hash_set(any::<i64>(), 2..64)) {
        let mut sut = HashTable::new(2, StdEq, crate::hash::StdHash::<std::collections::hash_map::RandomState>::default());
        for (i, &k) in keys.iter().enumerate() {
            sut.insert(k, i).expect("allocation");
        }
        prop_assert!(sut.capacity() > 2);
        prop_assert!(sut.capacity() * 3 >= keys.len() * 4);
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(sut.find(k), Some(&i));
        }
        sut.assert_invariants();
    }
}
