use cs_core::ids::EntryId;
use cs_core::intake::ValidationError;
use cs_core::ports::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("failed to read payload: {0}")]
    Payload(String),

    #[error("item is not in the queue: {0}")]
    NotInQueue(EntryId),
}

impl QueueError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Remote(err) if err.is_duplicate())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote(err) if err.is_not_found())
    }
}
