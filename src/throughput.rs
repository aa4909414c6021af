//! Throughput harness: fixed-window operation rates for each workload shape.
//!
//! Inputs are generated once and shared by every variant, so the only thing
//! that changes between runs is the map behind the contract. Reports carry no
//! pass/fail; compare them across variants.

use crate::config::MapBuilder;
use crate::error::Error;
use crate::keys::{random_keys, DEFAULT_KEY_LEN};
use crate::map::{ConcurrentMap, Variant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

/// Operations between checks of the stop flag.
const BATCH: u64 = 64;

/// Shape of the operations issued by every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workload {
    /// `get` on keys populated before the window opens.
    ReadOnly,
    /// `set` of random key/value pairs.
    WriteOnly,
    /// Each worker alternates `set` and `get`.
    Alternating,
}

impl Workload {
    /// All workload shapes.
    pub const ALL: [Workload; 3] = [
        Workload::ReadOnly,
        Workload::WriteOnly,
        Workload::Alternating,
    ];

    /// Stable name used in logs and benchmark ids.
    pub fn name(&self) -> &'static str {
        match self {
            Workload::ReadOnly => "get",
            Workload::WriteOnly => "set",
            Workload::Alternating => "mix",
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for a throughput run.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Concurrent worker threads.
    pub workers: usize,
    /// Measurement window per workload.
    pub window: Duration,
    /// Number of pre-generated keys (and values) each worker cycles through.
    pub key_space: usize,
    /// Length of each generated key and value.
    pub key_len: usize,
    /// Seed for input generation, so runs are repeatable.
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(4, |n| n.get()),
            window: Duration::from_secs(1),
            key_space: 1_000_000,
            key_len: DEFAULT_KEY_LEN,
            seed: 0x5eed,
        }
    }
}

/// Pre-generated random inputs, produced before any timing starts.
#[derive(Debug, Clone)]
pub struct WorkloadInputs {
    set_keys: Vec<String>,
    set_values: Vec<String>,
    get_keys: Vec<String>,
}

impl WorkloadInputs {
    /// Generate `key_space` keys and values per array from the config's seed.
    pub fn generate(config: &WorkloadConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let count = config.key_space.max(1);
        Self {
            set_keys: random_keys(&mut rng, count, config.key_len),
            set_values: random_keys(&mut rng, count, config.key_len),
            get_keys: random_keys(&mut rng, count, config.key_len),
        }
    }

    /// Entries per input array.
    pub fn len(&self) -> usize {
        self.get_keys.len()
    }

    /// Whether there are no inputs. Never true for generated inputs.
    pub fn is_empty(&self) -> bool {
        self.get_keys.is_empty()
    }

    /// Store every read key, mapped to itself.
    pub fn prefill<M>(&self, map: &M)
    where
        M: ConcurrentMap<String> + ?Sized,
    {
        for key in &self.get_keys {
            map.set(key, key.clone());
        }
    }

    /// Issue one operation: set the `idx`-th pair if `write`, else get the
    /// `idx`-th read key. `idx` wraps around the input length.
    #[inline]
    pub fn issue<M>(&self, map: &M, write: bool, idx: usize)
    where
        M: ConcurrentMap<String> + ?Sized,
    {
        let idx = idx % self.len();
        if write {
            map.set(&self.set_keys[idx], self.set_values[idx].clone());
        } else {
            black_box(map.get(&self.get_keys[idx]));
        }
    }
}

/// Outcome of one workload against one map.
#[derive(Debug, Clone)]
pub struct ThroughputReport {
    /// Workload that ran.
    pub workload: Workload,
    /// Worker threads used.
    pub workers: usize,
    /// Operations completed across all workers.
    pub operations: u64,
    /// Wall time from the start barrier until every worker stopped.
    pub elapsed: Duration,
}

impl ThroughputReport {
    /// Operations per second over the measured window.
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.operations as f64 / secs
    }
}

fn drive<M>(
    map: &M,
    workload: Workload,
    inputs: &WorkloadInputs,
    worker: usize,
    workers: usize,
    stop: &AtomicBool,
) -> u64
where
    M: ConcurrentMap<String> + ?Sized,
{
    let n = inputs.len();
    // Stagger starting points so workers do not walk the same keys in lockstep.
    let mut cursor = worker * (n / workers);
    let mut write = worker % 2 == 0;
    let mut operations = 0;

    while !stop.load(Ordering::Relaxed) {
        for _ in 0..BATCH {
            let idx = cursor;
            cursor = (cursor + 1) % n;
            match workload {
                Workload::ReadOnly => inputs.issue(map, false, idx),
                Workload::WriteOnly => inputs.issue(map, true, idx),
                Workload::Alternating => {
                    inputs.issue(map, write, idx);
                    write = !write;
                }
            }
        }
        operations += BATCH;
    }
    operations
}

/// Run one workload against `map` for `config.window`.
///
/// Read-only and alternating workloads prefill the read keys first; the
/// prefill is not timed.
pub fn measure<M>(
    map: &M,
    workload: Workload,
    inputs: &WorkloadInputs,
    config: &WorkloadConfig,
) -> ThroughputReport
where
    M: ConcurrentMap<String> + ?Sized,
{
    if workload != Workload::WriteOnly {
        inputs.prefill(map);
    }

    let workers = config.workers.max(1);
    let stop = AtomicBool::new(false);
    let barrier = Barrier::new(workers + 1);

    let (operations, elapsed) = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let (stop, barrier) = (&stop, &barrier);
                s.spawn(move || {
                    barrier.wait();
                    drive(map, workload, inputs, worker, workers, stop)
                })
            })
            .collect();

        barrier.wait();
        let start = Instant::now();
        thread::sleep(config.window);
        stop.store(true, Ordering::Relaxed);

        let operations: u64 = handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .sum();
        (operations, start.elapsed())
    });

    tracing::debug!(
        workload = workload.name(),
        workers,
        operations,
        elapsed_ms = elapsed.as_millis() as u64,
        "workload finished"
    );

    ThroughputReport {
        workload,
        workers,
        operations,
        elapsed,
    }
}

/// Run every workload against a fresh instance of each variant.
pub fn run_suite(
    builder: &MapBuilder,
    variants: &[Variant],
    config: &WorkloadConfig,
) -> Result<Vec<(Variant, ThroughputReport)>, Error> {
    let inputs = WorkloadInputs::generate(config);
    let mut reports = Vec::with_capacity(variants.len() * Workload::ALL.len());

    for &variant in variants {
        for workload in Workload::ALL {
            let map = builder.build::<String>(variant)?;
            let report = measure(&*map, workload, &inputs, config);
            tracing::info!(
                variant = variant.name(),
                workload = workload.name(),
                workers = report.workers,
                operations = report.operations,
                ops_per_sec = report.ops_per_sec() as u64,
                "throughput"
            );
            reports.push((variant, report));
        }
    }
    Ok(reports)
}
