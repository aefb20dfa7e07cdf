use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use vitals_config::MonitorConfig;
use vitals_core::{MetricSample, Result, Severity, VitalsError};

use crate::Collector;

const STAT_PATH: &str = "/proc/stat";
const ICON: &str = "󰻠";

/// Gap between the two counter snapshots used for the utilisation delta.
/// This is the only collector that blocks inside `collect()`; the sampling
/// loop absorbs the extra latency once per cycle.
const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// CPU utilisation from two aggregate `/proc/stat` snapshots taken a short
/// fixed window apart: `100 · (1 − Δidle/Δtotal)`.
pub struct CpuCollector {
    config: Arc<MonitorConfig>,
    stat_path: PathBuf,
}

impl CpuCollector {
    pub fn new(config: Arc<MonitorConfig>) -> Self {
        Self {
            config,
            stat_path: PathBuf::from(STAT_PATH),
        }
    }

    #[cfg(test)]
    fn with_stat_path(config: Arc<MonitorConfig>, path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            stat_path: path.into(),
        }
    }

    fn read_cpu_times(&self) -> Result<(u64, u64)> {
        let raw = std::fs::read_to_string(&self.stat_path)?;
        parse_cpu_line(raw.lines().next().unwrap_or_default())
    }

    fn try_collect(&self) -> Result<MetricSample> {
        let (idle1, total1) = self.read_cpu_times()?;
        std::thread::sleep(SAMPLE_WINDOW);
        let (idle2, total2) = self.read_cpu_times()?;

        let pct = usage_percent(idle2.saturating_sub(idle1), total2.saturating_sub(total1));
        let severity = Severity::from_value(pct, self.config.cpu_thresholds);

        Ok(MetricSample::new(
            "CPU",
            format!("{pct:.1}%"),
            ICON,
            severity,
            Some(pct),
            "%",
        ))
    }
}

impl Collector for CpuCollector {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn available(&self) -> bool {
        self.stat_path.exists()
    }

    fn collect(&mut self) -> MetricSample {
        self.try_collect().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "cpu collection failed");
            MetricSample::error("CPU", ICON)
        })
    }
}

/// Parse the aggregate `"cpu ..."` line into `(idle, total)` jiffy counts.
/// Idle includes the iowait field.
fn parse_cpu_line(line: &str) -> Result<(u64, u64)> {
    let fields = line
        .split_whitespace()
        .skip(1)
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| VitalsError::Parse(format!("/proc/stat: {e}")))?;

    if fields.len() < 5 {
        return Err(VitalsError::Parse(format!(
            "/proc/stat: expected at least 5 cpu fields, got {}",
            fields.len()
        )));
    }

    let idle = fields[3] + fields[4];
    let total = fields.iter().sum();
    Ok((idle, total))
}

fn usage_percent(d_idle: u64, d_total: u64) -> f64 {
    if d_total == 0 {
        return 0.0;
    }
    let pct = 100.0 * (1.0 - d_idle as f64 / d_total as f64);
    (pct * 10.0).round() / 10.0
}
