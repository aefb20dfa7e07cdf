use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use vitals_config::MonitorConfig;
use vitals_core::{MetricSample, Result, Severity, VitalsError};

use crate::Collector;

const NET_DEV_PATH: &str = "/proc/net/dev";
const ICON: &str = "󰛳";

/// Throughput from cumulative `/proc/net/dev` byte counters, summed over all
/// non-loopback interfaces.
///
/// The only stateful collector: it keeps the previous counter snapshot so
/// each call after the first can report `Δbytes/Δt`. The first call returns
/// a dim "measuring..." placeholder and just records the baseline.
pub struct NetworkCollector {
    config: Arc<MonitorConfig>,
    dev_path: PathBuf,
    prev: Option<CounterSnapshot>,
}

#[derive(Debug, Clone, Copy)]
struct CounterSnapshot {
    rx: u64,
    tx: u64,
    at: Instant,
}

impl NetworkCollector {
    pub fn new(config: Arc<MonitorConfig>) -> Self {
        Self {
            config,
            dev_path: PathBuf::from(NET_DEV_PATH),
            prev: None,
        }
    }

    fn read_counters(&self) -> Result<(u64, u64)> {
        let raw = std::fs::read_to_string(&self.dev_path)?;
        parse_counters(&raw)
    }

    /// Rate computation against the stored baseline; split out from the
    /// counter read so the arithmetic is testable with synthetic inputs.
    fn sample_at(&mut self, rx: u64, tx: u64, now: Instant) -> MetricSample {
        let Some(prev) = self.prev.replace(CounterSnapshot { rx, tx, at: now }) else {
            return MetricSample::info("Network", "measuring...", ICON);
        };

        let mut elapsed = now.duration_since(prev.at).as_secs_f64();
        if elapsed <= 0.0 {
            elapsed = 1.0;
        }

        let rx_rate = rx.saturating_sub(prev.rx) as f64 / elapsed;
        let tx_rate = tx.saturating_sub(prev.tx) as f64 / elapsed;
        let peak_mbs = rx_rate.max(tx_rate) / 1_000_000.0;
        let severity = Severity::from_value(peak_mbs, self.config.network_thresholds);

        MetricSample::new(
            "Network",
            format!("↓ {}  ↑ {}", format_rate(rx_rate), format_rate(tx_rate)),
            ICON,
            severity,
            None,
            "",
        )
    }

    fn try_collect(&mut self) -> Result<MetricSample> {
        let (rx, tx) = self.read_counters()?;
        Ok(self.sample_at(rx, tx, Instant::now()))
    }
}

impl Collector for NetworkCollector {
    fn name(&self) -> &'static str {
        "network"
    }

    fn available(&self) -> bool {
        self.dev_path.exists()
    }

    fn collect(&mut self) -> MetricSample {
        self.try_collect().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "network collection failed");
            MetricSample::error("Network", ICON)
        })
    }
}

/// Sum `(rx_bytes, tx_bytes)` over every interface except `lo`. The first
/// two lines of `/proc/net/dev` are headers.
fn parse_counters(raw: &str) -> Result<(u64, u64)> {
    let mut rx_total = 0u64;
    let mut tx_total = 0u64;

    for line in raw.lines().skip(2) {
        let Some((iface, data)) = line.split_once(':') else {
            continue;
        };
        if iface.trim() == "lo" {
            continue;
        }

        let fields: Vec<&str> = data.split_whitespace().collect();
        if fields.len() < 9 {
            return Err(VitalsError::Parse(format!(
                "/proc/net/dev: short line for {}",
                iface.trim()
            )));
        }

        let rx = fields[0]
            .parse::<u64>()
            .map_err(|e| VitalsError::Parse(format!("/proc/net/dev rx: {e}")))?;
        let tx = fields[8]
            .parse::<u64>()
            .map_err(|e| VitalsError::Parse(format!("/proc/net/dev tx: {e}")))?;

        rx_total += rx;
        tx_total += tx;
    }

    Ok((rx_total, tx_total))
}

/// Human-readable throughput with breakpoints at 10^3 and 10^6 bytes/s.
fn format_rate(bps: f64) -> String {
    if bps >= 1_000_000.0 {
        format!("{:.1} MB/s", bps / 1_000_000.0)
    } else if bps >= 1_000.0 {
        format!("{:.1} KB/s", bps / 1_000.0)
    } else {
        format!("{bps:.0} B/s")
    }
}
