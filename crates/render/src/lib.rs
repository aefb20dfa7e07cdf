//! Render model: turns one batch of metric samples plus their histories into
//! a renderer-agnostic display tree.
//!
//! [`build`] is a pure function — no I/O, no state. Host facts and the wall
//! clock are inputs, captured by the caller once per cycle.

pub mod host;
pub mod sparkline;

pub use host::HostInfo;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use vitals_core::{MetricSample, Severity};

/// Structural description of one dashboard frame, decoupled from how it is
/// painted. The terminal adapter consumes exactly one tree per cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTree {
    pub header: Header,
    pub rows: Vec<PanelRow>,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub hostname: String,
    pub kernel: String,
    pub uptime: String,
}

/// Metric panels are laid out two per row in activation order; a dangling
/// odd panel occupies a row alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub left: Panel,
    pub right: Option<Panel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
    pub severity: Severity,
    /// Gauge fill in `[0, 100]`; `None` = no bar for this metric.
    pub percentage: Option<f64>,
    /// Unit suffix for the gauge readout, may be empty.
    pub unit: &'static str,
    /// Pre-rendered sparkline glyphs; `None` until history exists.
    pub sparkline: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub interval_secs: f64,
    pub clock: String,
}

/// Build the display tree for one sampling cycle.
pub fn build(
    samples: &[MetricSample],
    histories: &HashMap<String, Vec<f64>>,
    interval: Duration,
    host: &HostInfo,
    now: DateTime<Local>,
) -> DisplayTree {
    let panels: Vec<Panel> = samples
        .iter()
        .map(|sample| {
            let history = histories.get(&sample.label.to_lowercase());
            Panel {
                icon: sample.icon,
                label: sample.label,
                value: sample.value.clone(),
                severity: sample.severity,
                percentage: sample.percentage,
                unit: sample.unit,
                sparkline: history
                    .filter(|h| !h.is_empty())
                    .map(|h| sparkline::render(h, sparkline::DEFAULT_WIDTH)),
            }
        })
        .collect();

    let mut rows = Vec::with_capacity(panels.len().div_ceil(2));
    let mut panels = panels.into_iter();
    while let Some(left) = panels.next() {
        rows.push(PanelRow {
            left,
            right: panels.next(),
        });
    }

    DisplayTree {
        header: Header {
            hostname: host.hostname.clone(),
            kernel: host.kernel.clone(),
            uptime: host.uptime(),
        },
        rows,
        footer: Footer {
            interval_secs: interval.as_secs_f64(),
            clock: now.format("%H:%M:%S").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(label: &'static str, pct: Option<f64>) -> MetricSample {
        MetricSample::new(label, "42.0%", "", Severity::Normal, pct, "%")
    }

    fn fixed_host() -> HostInfo {
        HostInfo {
            hostname: "box".to_string(),
            kernel: "6.1.0".to_string(),
            uptime_secs: 90 * 60,
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn build_is_pure() {
        let samples = vec![sample("CPU", Some(42.0)), sample("Memory", Some(60.0))];
        let mut histories = HashMap::new();
        histories.insert("cpu".to_string(), vec![40.0, 42.0]);

        let a = build(&samples, &histories, Duration::from_secs(1), &fixed_host(), fixed_now());
        let b = build(&samples, &histories, Duration::from_secs(1), &fixed_host(), fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn panels_pair_up_two_per_row() {
        let samples = vec![
            sample("Disk", Some(10.0)),
            sample("Memory", Some(20.0)),
            sample("CPU", Some(30.0)),
        ];
        let tree = build(
            &samples,
            &HashMap::new(),
            Duration::from_secs(2),
            &fixed_host(),
            fixed_now(),
        );

        assert_eq!(tree.rows.len(), 2);
        assert_eq!(tree.rows[0].left.label, "Disk");
        assert_eq!(tree.rows[0].right.as_ref().unwrap().label, "Memory");
        // Odd final panel sits alone.
        assert_eq!(tree.rows[1].left.label, "CPU");
        assert!(tree.rows[1].right.is_none());
    }

    #[test]
    fn history_is_matched_by_lowercased_label() {
        let samples = vec![sample("CPU", Some(42.0))];
        let mut histories = HashMap::new();
        histories.insert("cpu".to_string(), vec![50.0, 50.0, 50.0]);

        let tree = build(
            &samples,
            &histories,
            Duration::from_secs(1),
            &fixed_host(),
            fixed_now(),
        );
        assert_eq!(tree.rows[0].left.sparkline.as_deref(), Some("▁▁▁"));
    }

    #[test]
    fn no_history_means_no_sparkline() {
        let samples = vec![sample("Network", None)];
        let tree = build(
            &samples,
            &HashMap::new(),
            Duration::from_secs(1),
            &fixed_host(),
            fixed_now(),
        );
        assert!(tree.rows[0].left.sparkline.is_none());
        assert!(tree.rows[0].left.percentage.is_none());
    }

    #[test]
    fn unit_is_carried_into_panels() {
        let samples = vec![MetricSample::new(
            "Temp",
            "62°C",
            "",
            Severity::Normal,
            Some(62.0),
            "°C",
        )];
        let tree = build(
            &samples,
            &HashMap::new(),
            Duration::from_secs(1),
            &fixed_host(),
            fixed_now(),
        );
        assert_eq!(tree.rows[0].left.unit, "°C");
    }

    #[test]
    fn header_and_footer_are_formatted() {
        let tree = build(
            &[sample("CPU", Some(1.0))],
            &HashMap::new(),
            Duration::from_secs(2),
            &fixed_host(),
            fixed_now(),
        );
        assert_eq!(tree.header.uptime, "1h 30m");
        assert_eq!(tree.footer.clock, "12:30:45");
        assert_eq!(tree.footer.interval_secs, 2.0);
    }
}
