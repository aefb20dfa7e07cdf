use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("collector error: {0}")]
    Collector(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no collectors available on this host")]
    NoCollectors,

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = VitalsError> = std::result::Result<T, E>;
