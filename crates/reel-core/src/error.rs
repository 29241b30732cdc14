/// Core error types for Reel.
use std::path::PathBuf;

use crate::color::ColorError;

/// A specialized Result type for Reel operations.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error type encompassing every stage of a run.
#[derive(Debug, thiserror::Error)]
pub enum ReelError {
    #[error("color error: {0}")]
    Color(#[from] ColorError),

    #[error("render error: {0}")]
    Render(String),

    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("probe error: {0}")]
    Probe(String),

    #[error("output error: {message} ({path:?})")]
    Output { message: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported feature: {0}")]
    Unsupported(String),
}

impl ReelError {
    /// Create an output error tied to a filesystem path.
    pub fn output(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ReelError::Output {
            message: message.into(),
            path: path.into(),
        }
    }
}
