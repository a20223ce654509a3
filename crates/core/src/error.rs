use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("config error: {0}")]
    Config(String),

    /// A reading could not be obtained this tick.  Recovered by skipping the
    /// metric; never shown to the user.
    #[error("acquisition unavailable: {0}")]
    Acquisition(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
