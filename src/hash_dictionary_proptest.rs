#![cfg(test)]

// Property tests for HashDictionary kept inside the crate so they can
// compare against the bucket function directly.

use crate::error::CollectionError;
use crate::hash_dictionary::{polynomial_hash, HashDictionary};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations so shrinking walks towards earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=8, proptest::collection::vec("[A-Za-z]{0,5}", 1..=10)).prop_flat_map(
        |(buckets, pool)| {
            let idx = proptest::sample::select((0..pool.len()).collect::<Vec<_>>());
            let op = prop_oneof![
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
                idx.clone().prop_map(Op::Remove),
                idx.clone().prop_map(Op::Get),
                prop_oneof![
                    proptest::sample::select(pool.clone()),
                    "[A-Za-z]{0,5}"
                ]
                .prop_map(Op::Contains),
                (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
                Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (buckets, pool.clone(), ops))
        },
    )
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences, with small
// bucket counts so chains collide constantly:
// - insert of an existing key overwrites in place and keeps `len`.
// - get/contains parity with the model; misses are `KeyNotFound`.
// - remove returns the model's value, then the key is gone.
// - iteration yields each live pair once, grouped by ascending bucket.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let mut sut: HashDictionary<String, i32> = HashDictionary::new(buckets).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let k = pool[i].clone();
                    let prev = sut.insert(k.clone(), v).unwrap();
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    let expected = model.remove(k).ok_or(CollectionError::KeyNotFound);
                    prop_assert_eq!(sut.remove(k.as_str()), expected);
                    prop_assert!(!sut.contains(k.as_str()));
                }
                Op::Get(i) => {
                    let k = &pool[i];
                    let got = sut.get(k.as_str()).ok().copied();
                    prop_assert_eq!(got, model.get(k).copied());
                }
                Op::Contains(s) => {
                    prop_assert_eq!(sut.contains(s.as_str()), model.contains_key(&s));
                }
                Op::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(mv) = model.get_mut(k) {
                        let v = sut.get_mut(k.as_str()).unwrap();
                        *v = v.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    } else {
                        prop_assert!(sut.get_mut(k.as_str()).is_err());
                    }
                }
                Op::Iterate => {
                    let seen: Vec<(String, i32)> =
                        sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    let seen_keys: BTreeSet<_> = seen.iter().map(|(k, _)| k.clone()).collect();
                    let model_keys: BTreeSet<_> = model.keys().cloned().collect();
                    prop_assert_eq!(seen.len(), model.len());
                    prop_assert_eq!(seen_keys, model_keys);
                    for (k, v) in &seen {
                        prop_assert_eq!(Some(v), model.get(k));
                    }
                    let order: Vec<usize> = seen
                        .iter()
                        .map(|(k, _)| polynomial_hash(k.as_str(), buckets).unwrap())
                        .collect();
                    prop_assert!(order.windows(2).all(|w| w[0] <= w[1]));
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.keys().count(), model.len());
        }
    }
}

// Property: iteration within one bucket preserves insertion order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_single_bucket_keeps_insertion_order(keys in proptest::collection::btree_set("[a-z]{1,4}", 1..20)) {
        let mut sut = HashDictionary::new(1).unwrap();
        let inserted: Vec<String> = keys.into_iter().collect();
        for (i, k) in inserted.iter().enumerate() {
            sut.insert(k.clone(), i).unwrap();
        }
        let walked: Vec<String> = sut.keys().cloned().collect();
        prop_assert_eq!(walked, inserted);
        prop_assert_eq!(sut.longest_chain(), sut.len());
    }
}
