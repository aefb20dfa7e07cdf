//! The sampling loop: polls every active collector once per cycle, feeds the
//! history tracker, and turns each batch into a display tree for the
//! terminal adapter.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::{mpsc, watch};
use vitals_collectors::Collector;
use vitals_config::MonitorConfig;
use vitals_core::{HistoryTracker, Result, VitalsError};
use vitals_render::{DisplayTree, HostInfo};

/// Lifecycle of the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Discovering,
    Running,
    Stopped,
}

/// Orchestrator for one monitor run.
///
/// Collectors are invoked sequentially within a cycle, in activation order,
/// so every tree reflects exactly one consistent batch. The history tracker
/// is only ever touched from this loop.
pub struct SamplingLoop {
    config: Arc<MonitorConfig>,
    collectors: Vec<Box<dyn Collector>>,
    tracker: HistoryTracker,
    // Published through a watch channel so transitions stay observable
    // after `run` consumes the loop.
    state: watch::Sender<LoopState>,
}

impl SamplingLoop {
    /// Probe every known collector variant and activate the available ones.
    /// Zero available collectors is a fatal startup condition.
    pub fn discover(config: Arc<MonitorConfig>) -> Result<Self> {
        let collectors = vitals_collectors::discover(&config);
        Self::with_collectors(config, collectors)
    }

    /// Build a loop over an explicit collector set (tests, embedding).
    pub fn with_collectors(
        config: Arc<MonitorConfig>,
        collectors: Vec<Box<dyn Collector>>,
    ) -> Result<Self> {
        if collectors.is_empty() {
            return Err(VitalsError::NoCollectors);
        }
        tracing::info!(count = collectors.len(), "starting with active collectors");

        let tracker = HistoryTracker::new(config.history_size);
        let (state, _) = watch::channel(LoopState::Discovering);
        Ok(Self {
            config,
            collectors,
            tracker,
            state,
        })
    }

    pub fn state(&self) -> LoopState {
        *self.state.borrow()
    }

    /// Watch lifecycle transitions; keeps reporting after [`SamplingLoop::run`]
    /// has taken ownership of the loop.
    pub fn subscribe(&self) -> watch::Receiver<LoopState> {
        self.state.subscribe()
    }

    pub fn collector_count(&self) -> usize {
        self.collectors.len()
    }

    /// One full pass: collect, record percentages, build the frame.
    pub fn cycle(&mut self) -> DisplayTree {
        let mut samples = Vec::with_capacity(self.collectors.len());
        for collector in &mut self.collectors {
            let sample = collector.collect();
            if let Some(pct) = sample.percentage {
                self.tracker.record(&sample.label.to_lowercase(), pct);
            }
            samples.push(sample);
        }

        vitals_render::build(
            &samples,
            &self.tracker.all_history(),
            self.config.refresh_interval,
            &HostInfo::capture(),
            Local::now(),
        )
    }

    /// Run until `shutdown` flips to true or the receiving side of `tx` is
    /// dropped. Cancellation is cooperative: it is observed at cycle
    /// boundaries, never mid-collection.
    ///
    /// Collectors run inline on this task; the cpu collector's ~100 ms
    /// sampling window is negligible next to the refresh interval.
    pub async fn run(mut self, tx: mpsc::Sender<DisplayTree>, mut shutdown: watch::Receiver<bool>) {
        self.state.send_replace(LoopState::Running);

        loop {
            if *shutdown.borrow() {
                break;
            }

            let tree = self.cycle();
            if tx.send(tree).await.is_err() {
                break; // adapter gone
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.refresh_interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        self.state.send_replace(LoopState::Stopped);
        tracing::debug!("sampling loop stopped");
    }
}

/// Discover collectors and spawn the loop as a background task.
///
/// Returns the display-tree stream and a shutdown handle; sending `true`
/// stops the loop at the next cycle boundary.
pub fn spawn(config: Arc<MonitorConfig>) -> Result<(mpsc::Receiver<DisplayTree>, watch::Sender<bool>)> {
    let sampler = SamplingLoop::discover(config)?;
    let (tx, rx) = mpsc::channel(2);
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(sampler.run(tx, stop_rx));
    Ok((rx, stop_tx))
}
