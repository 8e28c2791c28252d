// src/internal/error.rs

/// Errors surfaced by the configuration side of the logger.
///
/// Emission itself never returns an error; write failures are reported
/// through `tracing` and the record stream carries on.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown severity: {0:?}")]
    UnknownSeverity(String),
    #[error("invalid severity value: {0}")]
    InvalidSeverity(u8),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("tracing subscriber error: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, LogError>;
