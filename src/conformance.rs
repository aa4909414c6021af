//! Correctness harness: the same two-phase protocol for every variant.
//!
//! Phase one runs on the calling thread over [`SINGLE_THREAD_TABLE`]. Phase two
//! has a producer thread set the decimal strings `0..keys` to themselves while
//! a consumer thread, started after a short delay, reads them back and expects
//! every one to be present with its exact value.
//!
//! The consumer never reads a key before the producer's `set` for it has
//! returned. It learns that from a progress counter updated with `Relaxed`
//! ordering, which carries no happens-before edge of its own, so any value the
//! consumer sees was published by the map's synchronization alone.

use crate::map::ConcurrentMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Key/value pairs checked by the single-thread phase.
pub const SINGLE_THREAD_TABLE: [(&str, &str); 2] =
    [("test-key", "test-value"), ("test-key-1", "test-value-1")];

/// Keys written and read back by the concurrent phase.
pub const DEFAULT_KEY_COUNT: usize = 1_000_000;

/// How long the consumer waits before it starts reading.
pub const DEFAULT_READER_DELAY: Duration = Duration::from_millis(10);

/// Which phase of the protocol observed a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sequential set/get on one thread.
    SingleThread,
    /// Producer/consumer across two threads.
    Concurrent,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::SingleThread => f.write_str("single-thread"),
            Phase::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// A contract violation found by the harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A key was reported present before anything set it.
    PresentBeforeSet {
        /// Phase that observed it.
        phase: Phase,
        /// The key.
        key: String,
        /// Value that came back.
        found: String,
    },
    /// A key that was set is reported absent.
    Missing {
        /// Phase that observed it.
        phase: Phase,
        /// The key.
        key: String,
    },
    /// A key came back with a value other than the one set.
    WrongValue {
        /// Phase that observed it.
        phase: Phase,
        /// The key.
        key: String,
        /// Value that was set.
        expected: String,
        /// Value that came back.
        found: String,
    },
    /// A harness thread panicked.
    ThreadPanicked {
        /// Which thread.
        role: &'static str,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::PresentBeforeSet { phase, key, found } => write!(
                f,
                "{} phase: key {:?} present before set (value {:?})",
                phase, key, found
            ),
            Violation::Missing { phase, key } => {
                write!(f, "{} phase: key {:?} missing after set", phase, key)
            }
            Violation::WrongValue {
                phase,
                key,
                expected,
                found,
            } => write!(
                f,
                "{} phase: key {:?} expected {:?}, found {:?}",
                phase, key, expected, found
            ),
            Violation::ThreadPanicked { role } => write!(f, "{} thread panicked", role),
        }
    }
}

impl std::error::Error for Violation {}

/// Settings for the concurrent phase.
#[derive(Debug, Clone)]
pub struct ConcurrentCheck {
    /// Number of keys, `"0"` through `keys - 1`.
    pub keys: usize,
    /// Delay before the consumer starts.
    pub reader_delay: Duration,
}

impl Default for ConcurrentCheck {
    fn default() -> Self {
        Self {
            keys: DEFAULT_KEY_COUNT,
            reader_delay: DEFAULT_READER_DELAY,
        }
    }
}

fn expect_value(
    phase: Phase,
    key: &str,
    expected: &str,
    found: Option<String>,
) -> Result<(), Violation> {
    match found {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(Violation::WrongValue {
            phase,
            key: key.to_owned(),
            expected: expected.to_owned(),
            found,
        }),
        None => Err(Violation::Missing {
            phase,
            key: key.to_owned(),
        }),
    }
}

/// Single-thread phase: absent before set, exact value after.
///
/// Expects a map that has never seen the keys of [`SINGLE_THREAD_TABLE`].
pub fn check_single_thread<M>(map: &M) -> Result<(), Violation>
where
    M: ConcurrentMap<String> + ?Sized,
{
    let phase = Phase::SingleThread;
    for (key, value) in SINGLE_THREAD_TABLE {
        if let Some(found) = map.get(key) {
            return Err(Violation::PresentBeforeSet {
                phase,
                key: key.to_owned(),
                found,
            });
        }

        map.set(key, value.to_owned());
        expect_value(phase, key, value, map.get(key))?;
    }
    Ok(())
}

/// Publishes producer progress; on drop, releases the consumer even if the
/// producer panicked, so the consumer reports missing keys instead of spinning.
struct Progress<'a>(&'a AtomicUsize);

impl Drop for Progress<'_> {
    fn drop(&mut self) {
        self.0.store(usize::MAX, Ordering::Relaxed);
    }
}

/// Concurrent phase: one producer, one delayed consumer, same key sequence.
pub fn check_concurrent<M>(map: &M, check: &ConcurrentCheck) -> Result<(), Violation>
where
    M: ConcurrentMap<String> + ?Sized,
{
    let written = AtomicUsize::new(0);

    thread::scope(|s| {
        let producer = s.spawn(|| {
            let progress = Progress(&written);
            for i in 0..check.keys {
                let key = i.to_string();
                map.set(&key, key.clone());
                progress.0.store(i + 1, Ordering::Relaxed);
            }
        });

        let consumer = s.spawn(|| -> Result<(), Violation> {
            thread::sleep(check.reader_delay);
            for i in 0..check.keys {
                while written.load(Ordering::Relaxed) <= i {
                    thread::yield_now();
                }
                let key = i.to_string();
                expect_value(Phase::Concurrent, &key, &key, map.get(&key))?;
            }
            Ok(())
        });

        let consumed = consumer
            .join()
            .unwrap_or(Err(Violation::ThreadPanicked { role: "consumer" }));
        let produced = producer
            .join()
            .map_err(|_| Violation::ThreadPanicked { role: "producer" });
        produced.and(consumed)
    })
}

/// Both phases with default settings, on a fresh map.
///
/// ```rust
/// use lockgrain::conformance::{run_with, ConcurrentCheck};
/// use lockgrain::UnshardedRwLockMap;
/// use std::time::Duration;
///
/// let check = ConcurrentCheck { keys: 1_000, reader_delay: Duration::from_millis(1) };
/// run_with(&UnshardedRwLockMap::new(), &check).unwrap();
/// ```
pub fn run<M>(map: &M) -> Result<(), Violation>
where
    M: ConcurrentMap<String> + ?Sized,
{
    run_with(map, &ConcurrentCheck::default())
}

/// Both phases with explicit concurrent-phase settings, on a fresh map.
pub fn run_with<M>(map: &M, check: &ConcurrentCheck) -> Result<(), Violation>
where
    M: ConcurrentMap<String> + ?Sized,
{
    let result = check_single_thread(map).and_then(|()| check_concurrent(map, check));
    match &result {
        Ok(()) => tracing::debug!(keys = check.keys, "conformance passed"),
        Err(violation) => tracing::warn!(%violation, "conformance failed"),
    }
    result
}
