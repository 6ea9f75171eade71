//! Error types for the elevgrid crate.

use thiserror::Error;

/// Errors that can occur while sampling, storing or loading elevation grids.
#[derive(Debug, Error)]
pub enum GridError {
    /// The elevation lookup call could not be made or did not complete.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A provider response or a persisted artifact did not have the expected shape.
    #[error("Format error: {0}")]
    Format(String),

    /// A command line tool was invoked with the wrong arguments.
    #[error("Usage error: {0}")]
    Usage(String),

    /// The persisted artifact could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The grid request parameters are out of range.
    #[error("Invalid grid request: {0}")]
    InvalidRequest(String),
}

impl GridError {
    /// Process exit status for a fatal error of this kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            GridError::Usage(_) | GridError::InvalidRequest(_) => 2,
            GridError::Io(_) => 3,
            GridError::Format(_) => 4,
            GridError::Transport(_) => 5,
        }
    }
}

impl From<reqwest::Error> for GridError {
    fn from(err: reqwest::Error) -> Self {
        GridError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Format(err.to_string())
    }
}
