//! Metric collectors: each knows how to probe its own availability and
//! produce one [`MetricSample`] per invocation.
//!
//! Collectors are isolated failure domains. `collect()` is a total function:
//! any internal error (missing pseudo-file, command failure, parse error,
//! timeout) is converted into a sentinel "Error" sample instead of reaching
//! the sampling loop.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod temperature;
pub mod updates;

use std::sync::Arc;

use vitals_config::MonitorConfig;
use vitals_core::MetricSample;

/// A self-contained metric source.
///
/// Anything satisfying this trait can be added to [`discover`] without
/// touching the sampling loop — this is the system's only extensibility seam.
pub trait Collector: Send {
    /// Stable identifier (lower-cased metric kind).
    fn name(&self) -> &'static str;

    /// Cheap probe run once before activation. Must not panic; a failing
    /// probe means "not available", never an error.
    fn available(&self) -> bool;

    /// Perform one measurement. Never fails the caller: internal errors
    /// become a sentinel sample with value `"Error"` and critical severity.
    fn collect(&mut self) -> MetricSample;
}

/// Construct every known collector variant and keep those whose availability
/// probe passes. The order here fixes the panel order on the dashboard.
pub fn discover(config: &Arc<MonitorConfig>) -> Vec<Box<dyn Collector>> {
    let candidates: Vec<Box<dyn Collector>> = vec![
        Box::new(disk::DiskCollector::new(config.clone())),
        Box::new(memory::MemoryCollector::new(config.clone())),
        Box::new(cpu::CpuCollector::new(config.clone())),
        Box::new(network::NetworkCollector::new(config.clone())),
        Box::new(temperature::TemperatureCollector::new(config.clone())),
        Box::new(updates::UpdatesCollector::new(config.clone())),
    ];

    candidates
        .into_iter()
        .filter(|candidate| {
            let active = candidate.available();
            if active {
                tracing::debug!(collector = candidate.name(), "collector activated");
            } else {
                tracing::debug!(collector = candidate.name(), "collector unavailable, skipped");
            }
            active
        })
        .collect()
}
