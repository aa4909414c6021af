//! Shard load introspection.

/// Per-shard load of a sharded map, captured one shard at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Total number of entries across all shards.
    pub size: usize,
    /// Number of entries in each shard, in shard index order.
    pub shard_sizes: Vec<usize>,
}

impl Stats {
    pub(crate) fn from_shard_sizes(shard_sizes: Vec<usize>) -> Self {
        Self {
            size: shard_sizes.iter().sum(),
            shard_sizes,
        }
    }

    /// Average entries per shard.
    pub fn avg_load_per_shard(&self) -> f64 {
        if self.shard_sizes.is_empty() {
            return 0.0;
        }
        self.size as f64 / self.shard_sizes.len() as f64
    }

    /// Max load / average load. 1.0 is perfectly even; the caller picks the
    /// threshold that counts as a hot shard. Returns 0.0 for an empty map.
    pub fn max_load_ratio(&self) -> f64 {
        let avg = self.avg_load_per_shard();
        if avg == 0.0 {
            return 0.0;
        }
        let max = self.shard_sizes.iter().copied().max().unwrap_or(0);
        max as f64 / avg
    }

    /// Number of shards holding no entries.
    pub fn empty_shards(&self) -> usize {
        self.shard_sizes.iter().filter(|&&size| size == 0).count()
    }
}
