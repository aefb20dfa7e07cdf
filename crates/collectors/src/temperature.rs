use std::path::PathBuf;
use std::sync::Arc;

use vitals_config::MonitorConfig;
use vitals_core::{MetricSample, Result, Severity};

use crate::Collector;

const THERMAL_BASE: &str = "/sys/class/thermal";
const ICON: &str = "󰔏";

/// Hottest reading across all `thermal_zone*/temp` sysfs files
/// (millidegrees, divided down to °C). No zones at all reports a dim "N/A"
/// rather than an error.
pub struct TemperatureCollector {
    config: Arc<MonitorConfig>,
    base: PathBuf,
}

impl TemperatureCollector {
    pub fn new(config: Arc<MonitorConfig>) -> Self {
        Self {
            config,
            base: PathBuf::from(THERMAL_BASE),
        }
    }

    #[cfg(test)]
    fn with_base(config: Arc<MonitorConfig>, base: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base: base.into(),
        }
    }

    fn zone_temps(&self) -> Result<Vec<f64>> {
        let mut temps = Vec::new();
        for entry in std::fs::read_dir(&self.base)? {
            let entry = entry?;
            if !entry
                .file_name()
                .to_string_lossy()
                .starts_with("thermal_zone")
            {
                continue;
            }

            // Zones without a readable temp file are skipped, not fatal.
            let Ok(raw) = std::fs::read_to_string(entry.path().join("temp")) else {
                continue;
            };
            if let Ok(millideg) = raw.trim().parse::<i64>() {
                temps.push(millideg as f64 / 1000.0);
            }
        }
        Ok(temps)
    }

    fn try_collect(&self) -> Result<MetricSample> {
        let temps = self.zone_temps()?;
        let Some(max_temp) = temps.into_iter().reduce(f64::max) else {
            return Ok(MetricSample::info("Temp", "N/A", ICON));
        };

        let severity = Severity::from_value(max_temp, self.config.temp_thresholds);

        // The raw value string keeps readings above 100°; only the gauge
        // percentage is clamped.
        Ok(MetricSample::new(
            "Temp",
            format!("{max_temp:.0}°C"),
            ICON,
            severity,
            Some(max_temp),
            "°C",
        ))
    }
}

impl Collector for TemperatureCollector {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn available(&self) -> bool {
        self.zone_temps().map(|t| !t.is_empty()).unwrap_or(false)
    }

    fn collect(&mut self) -> MetricSample {
        self.try_collect().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "temperature collection failed");
            MetricSample::error("Temp", ICON)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_zone(base: &std::path::Path, zone: &str, millideg: &str) {
        let dir = base.join(zone);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("temp"), millideg).unwrap();
    }

    fn collector_at(base: impl Into<PathBuf>) -> TemperatureCollector {
        TemperatureCollector::with_base(Arc::new(MonitorConfig::default()), base)
    }

    #[test]
    fn reports_hottest_zone() {
        let tmp = tempfile::tempdir().unwrap();
        write_zone(tmp.path(), "thermal_zone0", "45000\n");
        write_zone(tmp.path(), "thermal_zone1", "62000\n");

        let mut collector = collector_at(tmp.path());
        assert!(collector.available());

        let sample = collector.collect();
        assert_eq!(sample.value, "62°C");
        assert_eq!(sample.percentage, Some(62.0));
        assert_eq!(sample.severity, Severity::Normal);
    }

    #[test]
    fn readings_above_100_clamp_gauge_only() {
        let tmp = tempfile::tempdir().unwrap();
        write_zone(tmp.path(), "thermal_zone0", "105000");

        let sample = collector_at(tmp.path()).collect();
        assert_eq!(sample.value, "105°C");
        assert_eq!(sample.percentage, Some(100.0));
        assert_eq!(sample.severity, Severity::Critical);
    }

    #[test]
    fn no_zones_is_dim_not_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut collector = collector_at(tmp.path());
        assert!(!collector.available());

        let sample = collector.collect();
        assert_eq!(sample.value, "N/A");
        assert_eq!(sample.severity, Severity::Dim);
    }

    #[test]
    fn missing_base_dir_yields_error_sentinel() {
        let sample = collector_at("/no/such/thermal/base").collect();
        assert_eq!(sample.value, "Error");
        assert_eq!(sample.severity, Severity::Critical);
    }
}
