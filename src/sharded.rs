//! Sharded variants: the key space is split into a fixed number of shards and
//! an operation only takes the lock of the shard that owns its key.
//!
//! All three share routing (DJB2 modulo shard count by default) and external
//! behavior. They differ in lock type and in where the locks live in memory.

use crate::config::Config;
use crate::error::Error;
use crate::hash::ShardHasher;
use crate::map::ConcurrentMap;
use crate::shard::{new_table, upsert, MutexShard, RwLockShard, Table};
use crate::stats::Stats;
use parking_lot::RwLock;
use std::cell::UnsafeCell;

fn build_shards<S>(config: &Config, make: impl Fn(Option<usize>) -> S) -> Result<Box<[S]>, Error> {
    if config.shard_count == 0 {
        return Err(Error::InvalidShardCount);
    }
    Ok((0..config.shard_count)
        .map(|_| make(config.capacity_per_shard))
        .collect())
}

/// Each shard is a table behind its own `Mutex`.
///
/// Operations on different shards run in parallel; operations on the same
/// shard serialize.
pub struct ShardedMutexMap<V = String> {
    shards: Box<[MutexShard<V>]>,
    hasher: ShardHasher,
}

impl<V: Clone> ShardedMutexMap<V> {
    /// Create a map with `shard_count` shards routed by DJB2.
    pub fn new(shard_count: usize) -> Result<Self, Error> {
        Self::with_config(&Config::new().shard_count(shard_count)?)
    }

    /// Create a map from a config.
    pub fn with_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            shards: build_shards(config, MutexShard::new)?,
            hasher: config.hasher(),
        })
    }

    #[inline]
    fn shard(&self, key: &str) -> &MutexShard<V> {
        &self.shards[self.hasher.route(key.as_bytes(), self.shards.len())]
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Total entries. Locks each shard in turn, so it is not a consistent snapshot.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Whether every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-shard sizes.
    pub fn stats(&self) -> Stats {
        Stats::from_shard_sizes(self.shards.iter().map(|shard| shard.len()).collect())
    }
}

impl<V> ConcurrentMap<V> for ShardedMutexMap<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.shard(key).get(key)
    }

    fn set(&self, key: &str, value: V) {
        self.shard(key).set(key, value)
    }
}

/// Each shard pairs a `RwLock` with its table in one record.
///
/// Readers within a shard run concurrently; a writer excludes the rest of its
/// shard only.
///
/// # Example
///
/// ```rust
/// use lockgrain::{ConcurrentMap, ShardedRwLockMap};
///
/// let map = ShardedRwLockMap::new(32)?;
/// map.set("test-key", "test-value".to_string());
/// assert_eq!(map.get("test-key").as_deref(), Some("test-value"));
/// assert_eq!(map.stats().size, 1);
/// # Ok::<(), lockgrain::Error>(())
/// ```
pub struct ShardedRwLockMap<V = String> {
    shards: Box<[RwLockShard<V>]>,
    hasher: ShardHasher,
}

impl<V: Clone> ShardedRwLockMap<V> {
    /// Create a map with `shard_count` shards routed by DJB2.
    pub fn new(shard_count: usize) -> Result<Self, Error> {
        Self::with_config(&Config::new().shard_count(shard_count)?)
    }

    /// Create a map from a config.
    pub fn with_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            shards: build_shards(config, RwLockShard::new)?,
            hasher: config.hasher(),
        })
    }

    #[inline]
    fn shard(&self, key: &str) -> &RwLockShard<V> {
        &self.shards[self.hasher.route(key.as_bytes(), self.shards.len())]
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Total entries. Read-locks each shard in turn.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Whether every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-shard sizes.
    pub fn stats(&self) -> Stats {
        Stats::from_shard_sizes(self.shards.iter().map(|shard| shard.len()).collect())
    }
}

impl<V> ConcurrentMap<V> for ShardedRwLockMap<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.shard(key).get(key)
    }

    fn set(&self, key: &str, value: V) {
        self.shard(key).set(key, value)
    }
}

/// Same locking rules as [`ShardedRwLockMap`], but the locks are kept in one
/// contiguous sequence and the tables in another, indexed by the same shard
/// index. Lock words never share a cache line with table headers.
pub struct ShardedSegregatedRwLockMap<V = String> {
    locks: Box<[RwLock<()>]>,
    tables: Box<[UnsafeCell<Table<V>>]>,
    hasher: ShardHasher,
}

// SAFETY: `tables[i]` is only reached through `read_table`/`write_table`, which
// hold `locks[i]` for the lifetime of the returned reference. That gives the
// same guarantees as `RwLock<Table<V>>`, which is Sync under the same bound.
unsafe impl<V: Send + Sync> Sync for ShardedSegregatedRwLockMap<V> {}

impl<V: Clone> ShardedSegregatedRwLockMap<V> {
    /// Create a map with `shard_count` shards routed by DJB2.
    pub fn new(shard_count: usize) -> Result<Self, Error> {
        Self::with_config(&Config::new().shard_count(shard_count)?)
    }

    /// Create a map from a config.
    pub fn with_config(config: &Config) -> Result<Self, Error> {
        let tables = build_shards(config, |capacity| UnsafeCell::new(new_table(capacity)))?;
        let locks = (0..tables.len()).map(|_| RwLock::new(())).collect();
        Ok(Self {
            locks,
            tables,
            hasher: config.hasher(),
        })
    }

    #[inline]
    fn index(&self, key: &str) -> usize {
        self.hasher.route(key.as_bytes(), self.tables.len())
    }

    fn read_table<R>(&self, idx: usize, f: impl FnOnce(&Table<V>) -> R) -> R {
        let _guard = self.locks[idx].read();
        // SAFETY: shared lock `idx` is held until `_guard` drops after `f` returns.
        let table = unsafe { &*self.tables[idx].get() };
        f(table)
    }

    fn write_table<R>(&self, idx: usize, f: impl FnOnce(&mut Table<V>) -> R) -> R {
        let _guard = self.locks[idx].write();
        // SAFETY: exclusive lock `idx` is held until `_guard` drops after `f` returns.
        let table = unsafe { &mut *self.tables[idx].get() };
        f(table)
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.tables.len()
    }

    /// Total entries. Read-locks each shard in turn.
    pub fn len(&self) -> usize {
        (0..self.tables.len())
            .map(|idx| self.read_table(idx, |table| table.len()))
            .sum()
    }

    /// Whether every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-shard sizes.
    pub fn stats(&self) -> Stats {
        Stats::from_shard_sizes(
            (0..self.tables.len())
                .map(|idx| self.read_table(idx, |table| table.len()))
                .collect(),
        )
    }
}

impl<V> ConcurrentMap<V> for ShardedSegregatedRwLockMap<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.read_table(self.index(key), |table| table.get(key).cloned())
    }

    fn set(&self, key: &str, value: V) {
        self.write_table(self.index(key), |table| upsert(table, key, value))
    }
}
