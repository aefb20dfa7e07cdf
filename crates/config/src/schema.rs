use std::time::Duration;
use vitals_core::Thresholds;

/// Run-wide monitor settings.
///
/// Built once at startup (defaults plus CLI overrides), wrapped in an `Arc`
/// and handed read-only to every collector. Never mutated after that.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Delay between sampling cycles.
    pub refresh_interval: Duration,
    /// Ring capacity of each per-metric history series.
    pub history_size: usize,

    /// Filesystem usage cutoffs (percent used).
    pub disk_thresholds: Thresholds,
    /// Memory usage cutoffs (percent used).
    pub memory_thresholds: Thresholds,
    /// CPU utilisation cutoffs (percent busy).
    pub cpu_thresholds: Thresholds,
    /// Thermal cutoffs (degrees Celsius).
    pub temp_thresholds: Thresholds,
    /// Pending package count cutoffs.
    pub update_thresholds: Thresholds,
    /// Throughput cutoffs in MB/s, applied to the faster direction.
    pub network_thresholds: Thresholds,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(1),
            history_size: 20,
            disk_thresholds: Thresholds::new(80.0, 95.0),
            memory_thresholds: Thresholds::new(70.0, 90.0),
            cpu_thresholds: Thresholds::new(70.0, 90.0),
            temp_thresholds: Thresholds::new(70.0, 90.0),
            update_thresholds: Thresholds::new(20.0, 100.0),
            network_thresholds: Thresholds::new(50.0, 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = MonitorConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
        assert_eq!(config.history_size, 20);
        assert_eq!(config.disk_thresholds, Thresholds::new(80.0, 95.0));
        assert_eq!(config.cpu_thresholds, Thresholds::new(70.0, 90.0));
    }
}
