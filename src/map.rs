use std::fmt;

/// The contract every map strategy implements.
///
/// Two operations, nothing else: no removal, no iteration, no multi-key
/// transactions. Absence is `None`, never an error, and a stored empty value is
/// still `Some`. Implementations are sibling types selected at construction.
///
/// # Example
///
/// ```rust
/// use lockgrain::{ConcurrentMap, ShardedRwLockMap};
///
/// let map = ShardedRwLockMap::new(32)?;
/// assert_eq!(map.get("test-key"), None);
///
/// map.set("test-key", "test-value".to_string());
/// assert_eq!(map.get("test-key").as_deref(), Some("test-value"));
/// # Ok::<(), lockgrain::Error>(())
/// ```
pub trait ConcurrentMap<V>: Send + Sync {
    /// Current value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Option<V>;

    /// Insert `key`, or overwrite its value if it is already present.
    fn set(&self, key: &str, value: V);
}

/// The canonical, string-valued instantiation driven by the harnesses.
pub type StringMap = dyn ConcurrentMap<String>;

/// Every map strategy the crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// One table behind one `Mutex`.
    UnshardedMutex,
    /// One table behind one `RwLock`.
    UnshardedRwLock,
    /// Per-shard `Mutex`.
    ShardedMutex,
    /// Per-shard `RwLock`, lock and table in one record.
    ShardedRwLock,
    /// Per-shard `RwLock`, locks and tables in separate parallel sequences.
    ShardedSegregatedRwLock,
    /// `dashmap::DashMap`.
    DashMap,
    /// `flurry::HashMap`.
    Flurry,
    /// `papaya::HashMap`.
    Papaya,
    /// `scc::HashMap`.
    Scc,
}

impl Variant {
    /// All variants, lock strategies first.
    pub const ALL: [Variant; 9] = [
        Variant::UnshardedMutex,
        Variant::UnshardedRwLock,
        Variant::ShardedMutex,
        Variant::ShardedRwLock,
        Variant::ShardedSegregatedRwLock,
        Variant::DashMap,
        Variant::Flurry,
        Variant::Papaya,
        Variant::Scc,
    ];

    /// Stable name used in logs and benchmark ids.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::UnshardedMutex => "unsharded_mutex",
            Variant::UnshardedRwLock => "unsharded_rwlock",
            Variant::ShardedMutex => "sharded_mutex",
            Variant::ShardedRwLock => "sharded_rwlock",
            Variant::ShardedSegregatedRwLock => "sharded_segregated_rwlock",
            Variant::DashMap => "dashmap",
            Variant::Flurry => "flurry",
            Variant::Papaya => "papaya",
            Variant::Scc => "scc",
        }
    }

    /// Whether this variant routes keys through this crate's shard hashing.
    pub fn is_sharded(&self) -> bool {
        matches!(
            self,
            Variant::ShardedMutex | Variant::ShardedRwLock | Variant::ShardedSegregatedRwLock
        )
    }

    /// Whether this variant wraps an external concurrent map.
    pub fn is_adapter(&self) -> bool {
        matches!(
            self,
            Variant::DashMap | Variant::Flurry | Variant::Papaya | Variant::Scc
        )
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
