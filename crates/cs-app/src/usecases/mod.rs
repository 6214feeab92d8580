//! Queue use cases, one per file.
//!
//! A use case stands alone when it ends in a decision the user (or the remote)
//! makes separately: a duplicate prompt, a bulk delete confirmation.

pub mod bulk_remove_content;
pub mod bulk_update_content;
pub mod check_sync;
pub mod load_queue;
pub mod remove_content;
pub mod search_content;
pub mod settings;
pub mod submit_content;
pub mod update_content;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk_remove_content::{BulkDeleteOutcome, BulkDeleteRequest, BulkRemoveContent};
pub use bulk_update_content::BulkUpdateContent;
pub use check_sync::SyncAuditor;
pub use load_queue::LoadQueue;
pub use remove_content::RemoveContent;
pub use search_content::SearchContent;
pub use submit_content::{DuplicateResolution, SubmitContent, SubmitOutcome};
pub use update_content::UpdateContent;
