use crate::adapters::{DashMapAdapter, FlurryAdapter, PapayaAdapter, SccAdapter};
use crate::error::Error;
use crate::hash::ShardHasher;
use crate::map::{ConcurrentMap, Variant};
use crate::sharded::{ShardedMutexMap, ShardedRwLockMap, ShardedSegregatedRwLockMap};
use crate::unsharded::{UnshardedMutexMap, UnshardedRwLockMap};
use std::sync::Arc;

/// Shard count used when none is configured.
pub const DEFAULT_SHARD_COUNT: usize = 32;

/// Which hash function to use for shard assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// DJB2 (default).
    #[default]
    Djb2,
    /// 32-bit FNV-1.
    Fnv32,
    /// ahash with fixed keys.
    AHash,
    /// fxhash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Configuration shared by every variant a builder produces.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) shard_count: usize,
    pub(crate) hash_function: Option<HashFunction>,
    pub(crate) capacity_per_shard: Option<usize>,
}

impl Config {
    /// Create a new config with defaults (32 shards, DJB2).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Any count greater than 0; routing is modulo.
    pub fn shard_count(mut self, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidShardCount);
        }
        self.shard_count = count;
        Ok(self)
    }

    /// Set the hash function. Only sharded variants accept this.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = Some(hash_fn);
        self
    }

    /// Set initial capacity per shard. Unsharded and adapter variants get
    /// `capacity_per_shard * shard_count` in their single table.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.capacity_per_shard = Some(capacity);
        self
    }

    pub(crate) fn hasher(&self) -> ShardHasher {
        create_hasher(self.hash_function.unwrap_or_default())
    }

    pub(crate) fn total_capacity(&self) -> Option<usize> {
        self.capacity_per_shard
            .map(|capacity| capacity.saturating_mul(self.shard_count))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            hash_function: None,
            capacity_per_shard: None,
        }
    }
}

/// Builds any [`Variant`] behind the shared contract.
///
/// ```rust
/// use lockgrain::{MapBuilder, HashFunction, Variant};
///
/// let map = MapBuilder::new()
///     .shard_count(64)?
///     .hash_function(HashFunction::Fnv32)
///     .build::<String>(Variant::ShardedSegregatedRwLock)?;
///
/// map.set("key", "value".to_string());
/// assert_eq!(map.get("key").as_deref(), Some("value"));
/// # Ok::<(), lockgrain::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    config: Config,
}

impl MapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from an existing config.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the number of shards. Must be greater than 0.
    pub fn shard_count(mut self, count: usize) -> Result<Self, Error> {
        self.config = self.config.shard_count(count)?;
        Ok(self)
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Set initial capacity per shard.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_shard(capacity);
        self
    }

    /// The config this builder will apply.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build `variant` with the configured settings.
    ///
    /// Fails with [`Error::UnsupportedOption`] if a hash function was set for
    /// a variant that does not shard through this crate.
    pub fn build<V>(&self, variant: Variant) -> Result<Arc<dyn ConcurrentMap<V>>, Error>
    where
        V: Clone + Send + Sync + 'static,
    {
        let config = &self.config;
        if config.hash_function.is_some() && !variant.is_sharded() {
            return Err(Error::UnsupportedOption {
                variant: variant.name(),
                option: "hash_function",
            });
        }

        tracing::debug!(
            variant = variant.name(),
            shard_count = config.shard_count,
            hash_function = ?config.hash_function.unwrap_or_default(),
            "building map"
        );

        let capacity = config.total_capacity();
        let map: Arc<dyn ConcurrentMap<V>> = match variant {
            Variant::UnshardedMutex => {
                Arc::new(UnshardedMutexMap::<V>::with_capacity_opt(capacity))
            }
            Variant::UnshardedRwLock => {
                Arc::new(UnshardedRwLockMap::<V>::with_capacity_opt(capacity))
            }
            Variant::ShardedMutex => Arc::new(ShardedMutexMap::<V>::with_config(config)?),
            Variant::ShardedRwLock => Arc::new(ShardedRwLockMap::<V>::with_config(config)?),
            Variant::ShardedSegregatedRwLock => {
                Arc::new(ShardedSegregatedRwLockMap::<V>::with_config(config)?)
            }
            Variant::DashMap => Arc::new(DashMapAdapter::<V>::with_capacity_opt(capacity)),
            Variant::Flurry => Arc::new(FlurryAdapter::<V>::with_capacity_opt(capacity)),
            Variant::Papaya => Arc::new(PapayaAdapter::<V>::with_capacity_opt(capacity)),
            Variant::Scc => Arc::new(SccAdapter::<V>::with_capacity_opt(capacity)),
        };
        Ok(map)
    }
}

/// Create a hash function instance based on the configuration.
pub(crate) fn create_hasher(hash_fn: HashFunction) -> ShardHasher {
    match hash_fn {
        HashFunction::Djb2 => ShardHasher::Djb2,
        HashFunction::Fnv32 => ShardHasher::Fnv32,
        HashFunction::AHash => ShardHasher::AHash,
        #[cfg(feature = "fxhash")]
        HashFunction::FxHash => ShardHasher::FxHash,
    }
}
