use lockgrain::{
    djb_hash, shard_index, ConcurrentMap, Error, HashFunction, MapBuilder, ShardedMutexMap,
    ShardedRwLockMap, ShardedSegregatedRwLockMap, UnshardedMutexMap, Variant,
};

fn all_variants() -> Vec<(Variant, std::sync::Arc<lockgrain::StringMap>)> {
    let builder = MapBuilder::new();
    Variant::ALL
        .iter()
        .map(|&variant| (variant, builder.build::<String>(variant).unwrap()))
        .collect()
}

#[test]
fn test_absent_on_fresh_instance() {
    for (variant, map) in all_variants() {
        for key in ["", "test-key", "0", "never-set"] {
            assert_eq!(map.get(key), None, "{} {:?}", variant, key);
        }
    }
}

#[test]
fn test_set_then_get() {
    for (variant, map) in all_variants() {
        map.set("test-key", "test-value".to_string());
        assert_eq!(
            map.get("test-key").as_deref(),
            Some("test-value"),
            "{}",
            variant
        );
        assert_eq!(map.get("test-key-1"), None, "{}", variant);
    }
}

#[test]
fn test_overwrite() {
    for (variant, map) in all_variants() {
        map.set("a", "1".to_string());
        map.set("a", "2".to_string());
        assert_eq!(map.get("a").as_deref(), Some("2"), "{}", variant);
    }
}

#[test]
fn test_empty_value_is_not_absence() {
    for (variant, map) in all_variants() {
        map.set("empty", String::new());
        assert_eq!(map.get("empty"), Some(String::new()), "{}", variant);
    }
}

#[test]
fn test_empty_key() {
    for (variant, map) in all_variants() {
        map.set("", "root".to_string());
        assert_eq!(map.get("").as_deref(), Some("root"), "{}", variant);
    }
}

#[test]
fn test_non_ascii_keys() {
    for (variant, map) in all_variants() {
        map.set("ключ", "значение".to_string());
        map.set("鍵", "値".to_string());
        assert_eq!(map.get("ключ").as_deref(), Some("значение"), "{}", variant);
        assert_eq!(map.get("鍵").as_deref(), Some("値"), "{}", variant);
    }
}

#[test]
fn test_scenario_sharded_rwlock() {
    let map = ShardedRwLockMap::<String>::new(32).unwrap();
    assert_eq!(map.get("test-key"), None);
    map.set("test-key", "test-value".to_string());
    assert_eq!(map.get("test-key").as_deref(), Some("test-value"));
}

#[test]
fn test_scenario_unsharded_mutex() {
    let map = UnshardedMutexMap::<String>::new();
    map.set("a", "1".to_string());
    map.set("a", "2".to_string());
    assert_eq!(map.get("a").as_deref(), Some("2"));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_hash_primitives() {
    assert_eq!(djb_hash(""), 5381);
    assert_eq!(shard_index("abc", 1), 0);
    assert_eq!(shard_index("abc", 32), shard_index("abc", 32));
    assert_eq!(shard_index("abc", 32), djb_hash("abc") as usize % 32);
}

#[test]
fn test_generic_values() {
    let map: ShardedMutexMap<Vec<u32>> = ShardedMutexMap::new(8).unwrap();
    map.set("primes", vec![2, 3, 5, 7]);
    map.set("none", Vec::new());
    assert_eq!(map.get("primes"), Some(vec![2, 3, 5, 7]));
    assert_eq!(map.get("none"), Some(Vec::new()));

    let built = MapBuilder::new().build::<u64>(Variant::Papaya).unwrap();
    built.set("answer", 42);
    assert_eq!(built.get("answer"), Some(42));
}

#[test]
fn test_builder_errors() {
    assert_eq!(
        MapBuilder::new().shard_count(0).err(),
        Some(Error::InvalidShardCount)
    );
    assert!(ShardedSegregatedRwLockMap::<String>::new(0).is_err());

    let builder = MapBuilder::new().hash_function(HashFunction::AHash);
    assert!(builder.build::<String>(Variant::DashMap).is_err());
    assert!(builder.build::<String>(Variant::ShardedRwLock).is_ok());
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::InvalidShardCount.to_string(),
        "shard count must be greater than 0"
    );
    assert_eq!(
        Error::UnsupportedOption {
            variant: "dashmap",
            option: "hash_function",
        }
        .to_string(),
        "option `hash_function` does not apply to dashmap"
    );
}
