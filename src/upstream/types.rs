//! Upstream error definitions.

use thiserror::Error;

/// Errors from a single upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, timeout or non-success status reaching the endpoint.
    #[error("transport error: {0}")]
    Transport(String),

    /// The reply arrived but could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Protocol(_) => "protocol",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Transport(format!("timed out: {}", e))
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}
