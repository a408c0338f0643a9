use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of a single probe.
/// Every variant is caught at the probe boundary and folded into a
/// `ProbeResult`; nothing here propagates out of the runner.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body_excerpt}")]
    UnexpectedStatus { status: u16, body_excerpt: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to write artifact to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ProbeError {
    /// HTTP status carried by this error, when the exchange got far enough
    /// to produce one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProbeError::UnexpectedStatus { status, .. } => Some(*status),
            ProbeError::Transport(e) => e.status().map(|s| s.as_u16()),
            ProbeError::MalformedResponse(_) | ProbeError::Persistence { .. } => None,
        }
    }
}
