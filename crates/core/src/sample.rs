/// Warn / critical cutoff pair for one metric kind.
///
/// Direction is always "higher is worse" — a value below `warn` is healthy,
/// between `warn` and `crit` is a warning, at or above `crit` is critical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warn: f64,
    pub crit: f64,
}

impl Thresholds {
    pub const fn new(warn: f64, crit: f64) -> Self {
        Self { warn, crit }
    }
}

/// Severity bucket attached to every metric sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
    /// Informational / unknown — rendered dimmed, no alarm semantics.
    Dim,
}

impl Severity {
    /// Classify `value` against its threshold pair.
    #[must_use]
    pub fn from_value(value: f64, thresholds: Thresholds) -> Self {
        if value < thresholds.warn {
            Severity::Normal
        } else if value < thresholds.crit {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }
}

/// The immutable output of one collector invocation.
///
/// Produced fresh each sampling cycle; never stored beyond the percentage,
/// which feeds the history tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// Short human name, e.g. `"CPU"`.
    pub label: &'static str,
    /// Pre-formatted display string, e.g. `"42.0%"` or `"3.2 GB / 16 GB"`.
    pub value: String,
    /// Nerd-font glyph identifying the metric kind.
    pub icon: &'static str,
    pub severity: Severity,
    /// Value in `[0, 100]` when the metric has a natural percentage.
    /// Clamped at construction; this is what history tracks and bars show.
    pub percentage: Option<f64>,
    /// Display unit suffix, may be empty.
    pub unit: &'static str,
}

impl MetricSample {
    pub fn new(
        label: &'static str,
        value: impl Into<String>,
        icon: &'static str,
        severity: Severity,
        percentage: Option<f64>,
        unit: &'static str,
    ) -> Self {
        Self {
            label,
            value: value.into(),
            icon,
            severity,
            percentage: percentage.map(|p| p.clamp(0.0, 100.0)),
            unit,
        }
    }

    /// Sentinel returned when a collector's measurement fails internally.
    pub fn error(label: &'static str, icon: &'static str) -> Self {
        Self::new(label, "Error", icon, Severity::Critical, None, "")
    }

    /// Informational sample with no alarm semantics (e.g. `"measuring..."`).
    pub fn info(label: &'static str, value: impl Into<String>, icon: &'static str) -> Self {
        Self::new(label, value, icon, Severity::Dim, None, "")
    }
}
