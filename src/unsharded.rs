//! Single-table variants: one lock covers every key.

use crate::map::ConcurrentMap;
use crate::shard::{MutexShard, RwLockShard};

/// One table behind one exclusive lock. Every `get` and `set` serializes.
///
/// # Example
///
/// ```rust
/// use lockgrain::{ConcurrentMap, UnshardedMutexMap};
///
/// let map = UnshardedMutexMap::new();
/// map.set("a", "1".to_string());
/// map.set("a", "2".to_string());
/// assert_eq!(map.get("a").as_deref(), Some("2"));
/// ```
pub struct UnshardedMutexMap<V = String> {
    table: MutexShard<V>,
}

impl<V: Clone> UnshardedMutexMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_capacity_opt(None)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_opt(Some(capacity))
    }

    pub(crate) fn with_capacity_opt(capacity: Option<usize>) -> Self {
        Self {
            table: MutexShard::new(capacity),
        }
    }

    /// Number of entries. Takes the lock.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for UnshardedMutexMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentMap<V> for UnshardedMutexMap<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.table.get(key)
    }

    fn set(&self, key: &str, value: V) {
        self.table.set(key, value)
    }
}

/// One table behind one read-write lock.
///
/// Readers share the lock; a writer excludes everyone, even readers of
/// unrelated keys.
pub struct UnshardedRwLockMap<V = String> {
    table: RwLockShard<V>,
}

impl<V: Clone> UnshardedRwLockMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_capacity_opt(None)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_opt(Some(capacity))
    }

    pub(crate) fn with_capacity_opt(capacity: Option<usize>) -> Self {
        Self {
            table: RwLockShard::new(capacity),
        }
    }

    /// Number of entries. Takes the read lock.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for UnshardedRwLockMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentMap<V> for UnshardedRwLockMap<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.table.get(key)
    }

    fn set(&self, key: &str, value: V) {
        self.table.set(key, value)
    }
}
