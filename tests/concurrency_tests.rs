use lockgrain::{MapBuilder, StringMap, Variant};
use std::sync::Arc;
use std::thread;

fn build(variant: Variant) -> Arc<StringMap> {
    MapBuilder::new().build::<String>(variant).unwrap()
}

#[test]
fn test_concurrent_sets() {
    for variant in Variant::ALL {
        let map = build(variant);
        let mut handles = vec![];

        // Spawn 10 threads, each setting 100 distinct keys
        for thread_id in 0..10 {
            let map = Arc::clone(&map);
            let handle = thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("thread_{}_key_{}", thread_id, i);
                    map.set(&key, i.to_string());
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for thread_id in 0..10 {
            for i in 0..100 {
                let key = format!("thread_{}_key_{}", thread_id, i);
                assert_eq!(map.get(&key), Some(i.to_string()), "{}", variant);
            }
        }
    }
}

#[test]
fn test_concurrent_gets() {
    for variant in Variant::ALL {
        let map = build(variant);
        for i in 0..100 {
            map.set(&format!("key_{}", i), i.to_string());
        }

        let mut handles = vec![];

        // Spawn 20 readers, each reading every key
        for _ in 0..20 {
            let map = Arc::clone(&map);
            let handle = thread::spawn(move || {
                for i in 0..100 {
                    let value = map.get(&format!("key_{}", i)).unwrap();
                    assert_eq!(value, i.to_string());
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}

#[test]
fn test_racing_writers_leave_one_whole_value() {
    for variant in Variant::ALL {
        let map = build(variant);
        let mut handles = vec![];

        for thread_id in 0..8 {
            let map = Arc::clone(&map);
            let handle = thread::spawn(move || {
                let value = format!("writer-{}", thread_id).repeat(16);
                for _ in 0..1000 {
                    map.set("contended", value.clone());
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let value = map.get("contended").unwrap();
        let winner = (0..8)
            .map(|thread_id| format!("writer-{}", thread_id).repeat(16))
            .find(|candidate| *candidate == value);
        assert!(winner.is_some(), "{}: torn value {:?}", variant, value);
    }
}

#[test]
fn test_readers_never_see_torn_values() {
    for variant in Variant::ALL {
        let map = build(variant);
        let old = "a".repeat(64);
        let new = "b".repeat(64);
        map.set("k", old.clone());

        let writer = {
            let map = Arc::clone(&map);
            let (old, new) = (old.clone(), new.clone());
            thread::spawn(move || {
                for i in 0..2000 {
                    let value = if i % 2 == 0 { new.clone() } else { old.clone() };
                    map.set("k", value);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let map = Arc::clone(&map);
                let (old, new) = (old.clone(), new.clone());
                thread::spawn(move || {
                    for _ in 0..2000 {
                        let value = map.get("k").unwrap();
                        assert!(value == old || value == new);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}

#[test]
fn test_concurrent_mixed_operations() {
    for variant in Variant::ALL {
        let map = build(variant);
        let mut handles = vec![];

        // Spawn writers
        for thread_id in 0..5 {
            let map = Arc::clone(&map);
            let handle = thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("key_{}_{}", thread_id, i);
                    map.set(&key, key.clone());
                }
            });
            handles.push(handle);
        }

        // Spawn readers; a hit must carry the value written for that key
        for _ in 0..5 {
            let map = Arc::clone(&map);
            let handle = thread::spawn(move || {
                for _ in 0..100 {
                    for i in 0..10 {
                        let key = format!("key_{}_{}", i % 5, i);
                        if let Some(value) = map.get(&key) {
                            assert_eq!(value, key);
                        }
                    }
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(map.get("key_4_99").as_deref(), Some("key_4_99"), "{}", variant);
    }
}
