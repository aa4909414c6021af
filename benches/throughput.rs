//! Fixed-window throughput for every variant and workload.
//!
//! `RUST_LOG=lockgrain=info cargo bench --bench throughput`

use lockgrain::throughput::{run_suite, WorkloadConfig};
use lockgrain::{MapBuilder, Variant};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let builder = MapBuilder::new().shard_count(32)?;
    let config = WorkloadConfig {
        window: Duration::from_millis(500),
        ..WorkloadConfig::default()
    };

    let reports = run_suite(&builder, &Variant::ALL, &config)?;
    for (variant, report) in &reports {
        println!(
            "{:<28} {:<4} {:>3} workers {:>14.0} ops/s",
            variant.name(),
            report.workload.name(),
            report.workers,
            report.ops_per_sec()
        );
    }
    Ok(())
}
