//! Content queue domain model.

mod entry;
mod item;
mod query;
mod submission;
mod tags;
mod update;

pub use entry::QueueEntry;
pub use item::{
    derive_title, word_count, ContentItem, ContentKind, ContentMetadata, ContentSource,
    ContentStatus, PENDING_HASH, TITLE_MAX_CHARS,
};
pub use query::{QueueQuery, SortDirection, SortKey};
pub use submission::{FileRef, Payload, SubmitMethod, Submission};
pub use tags::Tags;
pub use update::{ItemUndo, ItemUpdate};
