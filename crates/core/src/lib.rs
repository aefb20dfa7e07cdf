pub mod error;
pub mod history;
pub mod sample;

pub use error::{Result, VitalsError};
pub use history::HistoryTracker;
pub use sample::{MetricSample, Severity, Thresholds};
