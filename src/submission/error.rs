use crate::transport::TransportError;
use std::io;

/// Why a single submission attempt failed. Every variant is terminal for
/// that attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("could not encode form payload: {0}")]
    Encode(#[source] io::Error),
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("submission worker panicked")]
    Aborted,
}

impl SubmitError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}
