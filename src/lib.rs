//! # lockgrain
//!
//! Interchangeable strategies for sharing a string-keyed map between threads,
//! and the harness that proves they behave the same and measures how fast
//! they go.
//!
//! Every strategy implements [`ConcurrentMap`]: `get` and `set`, nothing else.
//! What differs is how much of the key space one lock covers and where the
//! locks live in memory:
//!
//! - **Unsharded**: one table, one lock ([`UnshardedMutexMap`],
//!   [`UnshardedRwLockMap`]).
//! - **Sharded**: keys are split across a fixed number of shards by a DJB2
//!   hash, and only the owning shard is locked ([`ShardedMutexMap`],
//!   [`ShardedRwLockMap`], [`ShardedSegregatedRwLockMap`]).
//! - **Adapters**: external concurrent maps behind the same contract
//!   ([`DashMapAdapter`], [`FlurryAdapter`], [`PapayaAdapter`], [`SccAdapter`]).
//!
//! ## Example
//!
//! ```rust
//! use lockgrain::{ConcurrentMap, ShardedRwLockMap, UnshardedMutexMap};
//!
//! let map = ShardedRwLockMap::new(32)?;
//! assert_eq!(map.get("test-key"), None);
//! map.set("test-key", "test-value".to_string());
//! assert_eq!(map.get("test-key").as_deref(), Some("test-value"));
//!
//! // Values are generic; `String` is what the harnesses use.
//! let counts: UnshardedMutexMap<u64> = UnshardedMutexMap::new();
//! counts.set("hits", 3);
//! assert_eq!(counts.get("hits"), Some(3));
//! # Ok::<(), lockgrain::Error>(())
//! ```
//!
//! ## Building by name
//!
//! ```rust
//! use lockgrain::{conformance, MapBuilder, Variant};
//! use lockgrain::conformance::ConcurrentCheck;
//! use std::time::Duration;
//!
//! let builder = MapBuilder::new().shard_count(32)?;
//! let check = ConcurrentCheck { keys: 1_000, reader_delay: Duration::from_millis(1) };
//! for variant in Variant::ALL {
//!     let map = builder.build::<String>(variant)?;
//!     conformance::run_with(&*map, &check).unwrap();
//! }
//! # Ok::<(), lockgrain::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Adapters over external concurrent maps.
pub mod adapters;
/// Configuration and builder types.
pub mod config;
/// Correctness harness.
pub mod conformance;
/// Error types.
pub mod error;
/// Hash functions and shard routing.
pub mod hash;
/// Random key generation.
pub mod keys;
/// The shared map contract.
pub mod map;
/// Internal shard implementation.
mod shard;
/// Sharded lock variants.
pub mod sharded;
/// Shard load statistics.
pub mod stats;
/// Throughput harness.
pub mod throughput;
/// Unsharded lock variants.
pub mod unsharded;

// Re-export main types
pub use adapters::{DashMapAdapter, FlurryAdapter, PapayaAdapter, SccAdapter};
pub use config::{Config, HashFunction, MapBuilder, DEFAULT_SHARD_COUNT};
pub use error::Error;
pub use hash::{djb_hash, shard_index};
pub use map::{ConcurrentMap, StringMap, Variant};
pub use sharded::{ShardedMutexMap, ShardedRwLockMap, ShardedSegregatedRwLockMap};
pub use stats::Stats;
pub use unsharded::{UnshardedMutexMap, UnshardedRwLockMap};
