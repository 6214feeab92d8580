use thiserror::Error;

use crate::ids::RemoteId;

/// Failures reported by the remote content service.
///
/// The queue only branches on two categories, duplicate content and
/// not-found; everything else is handled as a generic failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("{message}")]
    Duplicate {
        message: String,
        existing_id: Option<RemoteId>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("remote request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("remote service unreachable: {0}")]
    Transport(String),

    #[error("remote request timed out")]
    Timeout,

    #[error("unexpected response from remote service: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
