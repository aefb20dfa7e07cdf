use std::process::Command;
use std::sync::Arc;

use vitals_config::MonitorConfig;
use vitals_core::{MetricSample, Result, Severity, VitalsError};

use crate::Collector;

const DF_BIN: &str = "df";
const ICON: &str = "󰋊";

/// Root filesystem usage from a single `df -h /` snapshot. Sizes are shown
/// verbatim as df formatted them; the percentage column drives the gauge.
pub struct DiskCollector {
    config: Arc<MonitorConfig>,
    df_bin: String,
}

impl DiskCollector {
    pub fn new(config: Arc<MonitorConfig>) -> Self {
        Self {
            config,
            df_bin: DF_BIN.to_string(),
        }
    }

    #[cfg(test)]
    fn with_binary(config: Arc<MonitorConfig>, df_bin: impl Into<String>) -> Self {
        Self {
            config,
            df_bin: df_bin.into(),
        }
    }

    fn try_collect(&self) -> Result<MetricSample> {
        let output = Command::new(&self.df_bin).args(["-h", "/"]).output()?;
        if !output.status.success() {
            return Err(VitalsError::Collector(format!(
                "df exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let (pct, used, total) = parse_df(&stdout)?;
        let severity = Severity::from_value(pct, self.config.disk_thresholds);

        Ok(MetricSample::new(
            "Disk",
            format!("{used} / {total}"),
            ICON,
            severity,
            Some(pct),
            "%",
        ))
    }
}

impl Collector for DiskCollector {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn available(&self) -> bool {
        Command::new(&self.df_bin)
            .args(["-h", "/"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn collect(&mut self) -> MetricSample {
        self.try_collect().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "disk collection failed");
            MetricSample::error("Disk", ICON)
        })
    }
}

/// Pull `(use%, used, total)` out of df's second output line.
fn parse_df(stdout: &str) -> Result<(f64, String, String)> {
    let line = stdout
        .lines()
        .nth(1)
        .ok_or_else(|| VitalsError::Parse("df: missing data line".into()))?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(VitalsError::Parse(format!(
            "df: expected at least 5 columns, got {}",
            parts.len()
        )));
    }

    let pct = parts[4]
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|e| VitalsError::Parse(format!("df use%: {e}")))?;

    Ok((pct, parts[2].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DF_OUTPUT: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/nvme0n1p2  466G  215G  228G  49% /
";

    #[test]
    fn parses_df_output() {
        let (pct, used, total) = parse_df(DF_OUTPUT).unwrap();
        assert_eq!(pct, 49.0);
        assert_eq!(used, "215G");
        assert_eq!(total, "466G");
    }

    #[test]
    fn rejects_header_only_output() {
        assert!(parse_df("Filesystem Size Used Avail Use% Mounted on\n").is_err());
        assert!(parse_df("").is_err());
    }

    #[test]
    fn missing_binary_yields_error_sentinel() {
        let config = Arc::new(MonitorConfig::default());
        let mut collector = DiskCollector::with_binary(config, "df-that-does-not-exist");
        assert!(!collector.available());

        let sample = collector.collect();
        assert_eq!(sample.value, "Error");
        assert_eq!(sample.severity, Severity::Critical);
        assert_eq!(sample.percentage, None);
    }
}
