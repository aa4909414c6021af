use std::hash::Hasher;

/// Seed of the DJB2 hash. Also the hash of the empty key.
pub const DJB2_SEED: u32 = 5381;

const FNV32_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV32_PRIME: u32 = 16_777_619;

/// DJB2 string hash: `hash = hash * 33 + byte` over every byte, wrapping at 32 bits.
///
/// Not collision resistant. It is only used to spread keys across shards, and
/// it is cheap enough to run on every call.
///
/// ```rust
/// use lockgrain::hash::djb_hash;
///
/// assert_eq!(djb_hash(""), 5381);
/// assert_eq!(djb_hash("a"), 5381 * 33 + 97);
/// ```
#[inline]
pub fn djb_hash(key: impl AsRef<[u8]>) -> u32 {
    key.as_ref().iter().fold(DJB2_SEED, |hash, &b| {
        (hash << 5).wrapping_add(hash).wrapping_add(u32::from(b))
    })
}

/// 32-bit FNV-1 hash (multiply, then xor).
#[inline]
pub fn fnv32(key: impl AsRef<[u8]>) -> u32 {
    key.as_ref().iter().fold(FNV32_OFFSET_BASIS, |hash, &b| {
        hash.wrapping_mul(FNV32_PRIME) ^ u32::from(b)
    })
}

/// Index of the shard that owns `key`, always in `[0, shard_count)`.
///
/// `shard_count` must be greater than zero; map constructors reject zero.
///
/// ```rust
/// use lockgrain::hash::shard_index;
///
/// assert_eq!(shard_index("abc", 1), 0);
/// assert!(shard_index("abc", 32) < 32);
/// ```
#[inline]
pub fn shard_index(key: impl AsRef<[u8]>, shard_count: usize) -> usize {
    debug_assert!(shard_count > 0);
    djb_hash(key) as usize % shard_count
}

/// Hash function used to route keys to shards.
/// Uses an enum so sharded maps stay free of trait objects on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardHasher {
    /// DJB2 (default).
    Djb2,
    /// 32-bit FNV-1.
    Fnv32,
    /// AHash with fixed keys, so routing is stable across instances.
    AHash,
    /// FxHash implementation.
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl ShardHasher {
    /// Hash a key's bytes.
    #[inline]
    pub fn hash_key(&self, key: &[u8]) -> u64 {
        match self {
            ShardHasher::Djb2 => u64::from(djb_hash(key)),
            ShardHasher::Fnv32 => u64::from(fnv32(key)),
            ShardHasher::AHash => {
                let mut hasher = ahash::AHasher::default();
                hasher.write(key);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => {
                let mut hasher = fxhash::FxHasher::default();
                hasher.write(key);
                hasher.finish()
            }
        }
    }

    /// Route a key to a shard in `[0, shard_count)` by taking the hash modulo the count.
    #[inline]
    pub fn route(&self, key: &[u8], shard_count: usize) -> usize {
        match self {
            // Stay in 32-bit arithmetic so this agrees with `shard_index`.
            ShardHasher::Djb2 => shard_index(key, shard_count),
            _ => (self.hash_key(key) % shard_count as u64) as usize,
        }
    }
}

impl Default for ShardHasher {
    fn default() -> Self {
        ShardHasher::Djb2
    }
}
