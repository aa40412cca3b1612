//! Error types for the typing level tracker.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot determine {0} directory")]
    NoDirectory(&'static str),
}

impl TrackerError {
    /// Stable numeric code, used in machine-readable bridge output
    pub fn code(&self) -> i32 {
        match self {
            TrackerError::Io(_) => 10,
            TrackerError::Json(_) => 11,
            TrackerError::NoDirectory(_) => 12,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
