//! Errors surfaced by the vehicle link and mission sequencing

use skyguide_core::GuidanceError;

/// Errors from the MAVLink vehicle link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Timeout waiting for {0}")]
    Timeout(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the staged flight sequence.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("Lifecycle command failed: {0}")]
    Lifecycle(&'static str),

    #[error("Guidance failed: {0}")]
    Guidance(GuidanceError),
}

impl From<GuidanceError> for MissionError {
    fn from(err: GuidanceError) -> Self {
        MissionError::Guidance(err)
    }
}
