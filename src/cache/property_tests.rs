//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the capacity, ordering and eviction guarantees
//! of the response cache.

use proptest::prelude::*;

use crate::cache::{ResponseCache, CACHE_CAPACITY};

// == Strategies ==
/// Generates identity keys from a small alphabet so duplicates occur
fn identity_key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}".prop_map(|s| s)
}

/// Generates response bodies, including empty not-found bodies
fn response_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9@+]{0,16}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, response: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (identity_key_strategy(), response_strategy())
            .prop_map(|(key, response)| CacheOp::Put { key, response }),
        identity_key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Capacity: no sequence of operations ever grows the cache past its bound.
    #[test]
    fn prop_capacity_never_exceeded(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut cache = ResponseCache::new();

        for op in ops {
            match op {
                CacheOp::Put { key, response } => cache.put(key, response),
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
            }
            prop_assert!(cache.len() <= CACHE_CAPACITY, "Cache grew to {}", cache.len());
        }
    }

    // Monotonic sequence: every insert gets a sequence above all earlier ones,
    // across evictions, and the stored sequences stay unique.
    #[test]
    fn prop_sequence_strictly_increasing(
        puts in prop::collection::vec((identity_key_strategy(), response_strategy()), 1..60)
    ) {
        let mut cache = ResponseCache::new();
        let mut highest: Option<u64> = None;

        for (key, response) in puts {
            cache.put(key, response);
            let newest = cache.entries().last().map(|e| e.sequence).unwrap();
            if let Some(previous) = highest {
                prop_assert!(newest > previous, "Sequence {} not above {}", newest, previous);
            }
            highest = Some(newest);

            let mut sequences: Vec<u64> = cache.entries().iter().map(|e| e.sequence).collect();
            sequences.sort_unstable();
            sequences.dedup();
            prop_assert_eq!(sequences.len(), cache.len(), "Duplicate sequence stored");
        }
    }

    // FIFO eviction: after inserting distinct keys, exactly the most recent
    // CACHE_CAPACITY of them remain retrievable.
    #[test]
    fn prop_fifo_keeps_latest_keys(count in 1usize..40) {
        let mut cache = ResponseCache::new();
        for i in 0..count {
            cache.put(format!("key{i}"), format!("value{i}"));
        }

        let first_kept = count.saturating_sub(CACHE_CAPACITY);
        for i in 0..count {
            let hit = cache.get(&format!("key{i}"));
            if i < first_kept {
                prop_assert!(hit.is_none(), "key{} should have been evicted", i);
            } else {
                prop_assert_eq!(hit, Some(format!("value{i}")));
            }
        }
    }

    // Hits are pure reads: they never change which entry is evicted next.
    #[test]
    fn prop_get_does_not_reorder(
        reads in prop::collection::vec(0usize..CACHE_CAPACITY, 0..30)
    ) {
        let mut cache = ResponseCache::new();
        for i in 0..CACHE_CAPACITY {
            cache.put(format!("key{i}"), format!("value{i}"));
        }
        let before = cache.entries().to_vec();

        for i in reads {
            let _ = cache.get(&format!("key{i}"));
        }

        prop_assert_eq!(cache.entries(), before.as_slice());
    }

    // Idempotence: reading the same key twice yields identical responses.
    #[test]
    fn prop_repeated_get_identical(key in identity_key_strategy(), response in response_strategy()) {
        let mut cache = ResponseCache::new();
        cache.put(key.clone(), response.clone());

        let first = cache.get(&key);
        let second = cache.get(&key);
        prop_assert_eq!(first.clone(), second);
        prop_assert_eq!(first, Some(response));
    }
}
