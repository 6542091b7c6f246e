use thiserror::Error;

/// Top-level error type for the Snapsight runtime.
#[derive(Debug, Error)]
pub enum SnapsightError {
    /// The inference provider rejected the call or reported a failure status.
    #[error("Clarifai error: {code} - {message}")]
    Provider { code: u32, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
