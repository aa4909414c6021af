//! Every variant through the identical correctness protocol: the single-thread
//! phase, then one producer and one delayed consumer over "0".."999999".

use lockgrain::conformance::{self, ConcurrentCheck, DEFAULT_KEY_COUNT};
use lockgrain::{
    ConcurrentMap, DashMapAdapter, FlurryAdapter, MapBuilder, PapayaAdapter, SccAdapter,
    ShardedMutexMap, ShardedRwLockMap, ShardedSegregatedRwLockMap, UnshardedMutexMap,
    UnshardedRwLockMap, Variant,
};
use std::time::Duration;

fn test<M: ConcurrentMap<String>>(map: M) {
    conformance::run(&map).unwrap();
}

#[test]
fn test_unsharded_mutex() {
    test(UnshardedMutexMap::new());
}

#[test]
fn test_unsharded_rwlock() {
    test(UnshardedRwLockMap::new());
}

#[test]
fn test_sharded_mutex() {
    test(ShardedMutexMap::new(32).unwrap());
}

#[test]
fn test_sharded_rwlock() {
    test(ShardedRwLockMap::new(32).unwrap());
}

#[test]
fn test_sharded_segregated_rwlock() {
    test(ShardedSegregatedRwLockMap::new(32).unwrap());
}

#[test]
fn test_dashmap() {
    test(DashMapAdapter::new());
}

#[test]
fn test_flurry() {
    test(FlurryAdapter::new());
}

#[test]
fn test_papaya() {
    test(PapayaAdapter::new());
}

#[test]
fn test_scc() {
    test(SccAdapter::new());
}

#[test]
fn test_default_check_matches_protocol() {
    let check = ConcurrentCheck::default();
    assert_eq!(check.keys, DEFAULT_KEY_COUNT);
    assert_eq!(check.keys, 1_000_000);
    assert_eq!(check.reader_delay, Duration::from_millis(10));
}

#[test]
fn test_built_variants_single_shard() {
    // One shard collapses the sharded variants onto a single lock; they must still conform.
    let builder = MapBuilder::new().shard_count(1).unwrap();
    let check = ConcurrentCheck {
        keys: 20_000,
        reader_delay: Duration::from_millis(1),
    };
    for variant in Variant::ALL {
        let map = builder.build::<String>(variant).unwrap();
        conformance::run_with(&*map, &check)
            .unwrap_or_else(|violation| panic!("{}: {}", variant, violation));
    }
}
