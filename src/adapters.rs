//! Adapters that put external concurrent maps behind [`ConcurrentMap`].
//!
//! Each one reports presence from the wrapped map's own lookup result. An
//! empty stored value is a hit, never treated as absent.

use crate::map::ConcurrentMap;
use std::hash::Hash;

/// `dashmap::DashMap`: internally sharded, one `RwLock` per shard.
pub struct DashMapAdapter<V = String> {
    inner: dashmap::DashMap<String, V>,
}

impl<V> DashMapAdapter<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_capacity_opt(None)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_opt(Some(capacity))
    }

    pub(crate) fn with_capacity_opt(capacity: Option<usize>) -> Self {
        let inner = match capacity {
            Some(capacity) => dashmap::DashMap::with_capacity(capacity),
            None => dashmap::DashMap::new(),
        };
        Self { inner }
    }
}

impl<V> Default for DashMapAdapter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentMap<V> for DashMapAdapter<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: V) {
        self.inner.insert(key.to_owned(), value);
    }
}

/// `flurry::HashMap`: a port of Java's `ConcurrentHashMap` with epoch-based reclamation.
pub struct FlurryAdapter<V = String> {
    inner: flurry::HashMap<String, V>,
}

impl<V> FlurryAdapter<V>
where
    V: Send + Sync + 'static,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_capacity_opt(None)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_opt(Some(capacity))
    }

    pub(crate) fn with_capacity_opt(capacity: Option<usize>) -> Self {
        let inner = match capacity {
            Some(capacity) => flurry::HashMap::with_capacity(capacity),
            None => flurry::HashMap::new(),
        };
        Self { inner }
    }
}

impl<V> Default for FlurryAdapter<V>
where
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentMap<V> for FlurryAdapter<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.pin().get(key).cloned()
    }

    fn set(&self, key: &str, value: V) {
        self.inner.pin().insert(key.to_owned(), value);
    }
}

/// `papaya::HashMap`: lock-free reads, incremental resizing.
pub struct PapayaAdapter<V = String> {
    inner: papaya::HashMap<String, V>,
}

impl<V> PapayaAdapter<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_capacity_opt(None)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_opt(Some(capacity))
    }

    pub(crate) fn with_capacity_opt(capacity: Option<usize>) -> Self {
        let inner = match capacity {
            Some(capacity) => papaya::HashMap::with_capacity(capacity),
            None => papaya::HashMap::new(),
        };
        Self { inner }
    }
}

impl<V> Default for PapayaAdapter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentMap<V> for PapayaAdapter<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.pin().get(key).cloned()
    }

    fn set(&self, key: &str, value: V) {
        self.inner.pin().insert(key.to_owned(), value);
    }
}

/// `scc::HashMap`: bucket-level locking with lock-free resizing.
pub struct SccAdapter<V = String> {
    inner: scc::HashMap<String, V>,
}

impl<V: 'static> SccAdapter<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_capacity_opt(None)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_opt(Some(capacity))
    }

    pub(crate) fn with_capacity_opt(capacity: Option<usize>) -> Self {
        let inner = match capacity {
            Some(capacity) => scc::HashMap::with_capacity(capacity),
            None => scc::HashMap::default(),
        };
        Self { inner }
    }
}

impl<V: 'static> Default for SccAdapter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentMap<V> for SccAdapter<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.read(key, |_, value| value.clone())
    }

    fn set(&self, key: &str, value: V) {
        upsert_scc(&self.inner, key.to_owned(), value);
    }
}

fn upsert_scc<K, V>(map: &scc::HashMap<K, V>, key: K, value: V)
where
    K: Eq + Hash + 'static,
    V: 'static,
{
    match map.entry(key) {
        scc::hash_map::Entry::Occupied(mut occupied) => {
            occupied.insert(value);
        }
        scc::hash_map::Entry::Vacant(vacant) => {
            vacant.insert_entry(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_empty_value_is_present<M: ConcurrentMap<String>>(map: M) {
        assert_eq!(map.get("k"), None);
        map.set("k", String::new());
        assert_eq!(map.get("k"), Some(String::new()));
        map.set("k", "v".to_string());
        assert_eq!(map.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_dashmap_empty_value() {
        check_empty_value_is_present(DashMapAdapter::new());
    }

    #[test]
    fn test_flurry_empty_value() {
        check_empty_value_is_present(FlurryAdapter::new());
    }

    #[test]
    fn test_papaya_empty_value() {
        check_empty_value_is_present(PapayaAdapter::new());
    }

    #[test]
    fn test_scc_empty_value() {
        check_empty_value_is_present(SccAdapter::new());
    }

    #[test]
    fn test_with_capacity() {
        check_empty_value_is_present(DashMapAdapter::with_capacity(16));
        check_empty_value_is_present(FlurryAdapter::with_capacity(16));
        check_empty_value_is_present(PapayaAdapter::with_capacity(16));
        check_empty_value_is_present(SccAdapter::with_capacity(16));
    }
}
