use std::collections::{HashMap, VecDeque};

/// Bounded per-metric history of recent percentage samples.
///
/// Each series is a FIFO ring: pushing past capacity evicts the oldest
/// entry, so a series never exceeds `capacity` values. Series are created
/// lazily on first record and live for the rest of the run.
#[derive(Debug)]
pub struct HistoryTracker {
    capacity: usize,
    series: HashMap<String, VecDeque<f64>>,
}

impl HistoryTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            series: HashMap::new(),
        }
    }

    /// Append `value` to the named series, evicting the oldest at capacity.
    pub fn record(&mut self, name: &str, value: f64) {
        let series = self
            .series
            .entry(name.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        if series.len() == self.capacity {
            series.pop_front();
        }
        series.push_back(value);
    }

    /// Snapshot of one series, oldest-first. Empty when the name is unknown.
    #[must_use]
    pub fn history(&self, name: &str) -> Vec<f64> {
        self.series
            .get(name)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Snapshot of every tracked series, for bulk consumption by the
    /// render builder.
    #[must_use]
    pub fn all_history(&self) -> HashMap<String, Vec<f64>> {
        self.series
            .iter()
            .map(|(name, s)| (name.clone(), s.iter().copied().collect()))
            .collect()
    }
}
