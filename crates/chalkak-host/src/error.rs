//! Host error types.

use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Session channel full, update dropped")]
    ChannelFull,

    #[error("Session ended")]
    SessionEnded,

    #[error("Trace parse error at line {line}: {message}")]
    TraceParse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session task failed: {0}")]
    SessionTask(#[from] tokio::task::JoinError),

    #[error("Guidance error: {0}")]
    Guidance(#[from] chalkak_guidance::GuidanceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn trace_parse(line: usize, msg: impl Into<String>) -> Self {
        Self::TraceParse {
            line,
            message: msg.into(),
        }
    }

    /// Whether the caller may simply retry on a later frame.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ChannelFull)
    }
}
