//! # cs-app
//!
//! Content queue orchestration: optimistic submit/update/remove against the
//! remote inbox, bulk operations, sync auditing and branding settings.

pub mod content_queue;
pub mod deps;
pub mod error;
pub mod queue;
pub mod usecases;

pub use content_queue::ContentQueue;
pub use deps::QueueDeps;
pub use error::QueueError;
pub use queue::{QueueEvent, QueueState};
pub use usecases::{BulkDeleteOutcome, BulkDeleteRequest, DuplicateResolution, SubmitOutcome};
