#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can check
// internal structure (chain links, bucket placement) after every step.

use crate::{ChainTable, HashParams, ShrinkPolicy, TableConfig};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Remove(usize),
    Search(usize),
    Contains(String),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), "[0-9]{0,3}").prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Search),
            1 => "[a-z]{0,6}".prop_map(OpI::Contains),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_policy() -> impl Strategy<Value = ShrinkPolicy> {
    prop_oneof![Just(ShrinkPolicy::Eager), Just(ShrinkPolicy::Sparse)]
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert/overwrite/remove/search agree with the model.
// - len equals the number of entries reachable through the chains.
// - every entry sits in the bucket its key hashes to under the current size.
// - chain back-links are consistent and keys are unique.
// - bucket count is 0 or a power of two >= 16.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), seed in any::<u64>(), policy in arb_policy()) {
        let mut sut = ChainTable::with_config(
            TableConfig::new()
                .with_params(HashParams::from_seed(seed))
                .with_shrink_policy(policy),
        );
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let buckets = sut.bucket_count();
                    let overwrite = model.contains_key(k);
                    sut.insert(k, &v).unwrap();
                    if overwrite {
                        prop_assert_eq!(sut.bucket_count(), buckets, "overwrite resized");
                    }
                    model.insert(k.clone(), v);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let got = sut.remove(k);
                    prop_assert_eq!(got, model.remove(k));
                    prop_assert!(!sut.contains(k));
                }
                OpI::Search(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.search(k).unwrap(), model.get(k).cloned());
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.bucket_count(), 0);
                }
            }

            sut.check_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.iter().count(), model.len());
        }
    }
}

// Growth trace: buckets only ever change on a new key arriving at a full
// table, and then exactly double (or go 0 -> 16).
proptest! {
    #[test]
    fn prop_growth_only_at_full(keys in proptest::collection::hash_set("[a-z0-9]{1,8}", 1..300)) {
        let mut sut = ChainTable::with_params(HashParams::from_seed(3));
        for k in keys {
            let (n, m) = (sut.len(), sut.bucket_count());
            sut.insert(&k, "v").unwrap();
            let expected = if n == m { if m == 0 { crate::MIN_TABLE_SIZE } else { m * 2 } } else { m };
            prop_assert_eq!(sut.bucket_count(), expected);
        }
        sut.check_invariants();
    }
}

// Bucket indices stay within range for arbitrary keys, including bytes
// beyond ASCII and digests that wrapped negative.
proptest! {
    #[test]
    fn prop_bucket_in_range(key in any::<String>(), seed in any::<u64>(), shift in 4u32..24) {
        let params = HashParams::from_seed(seed);
        let m = 1usize << shift;
        prop_assert!(params.bucket(&key, m) < m);
    }
}
