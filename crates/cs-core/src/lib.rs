//! # cs-core
//!
//! Core domain models and port definitions for Content Stack.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod config;
pub mod content;
pub mod ids;
pub mod intake;
pub mod ports;
pub mod settings;
pub mod sync;

pub use config::AppConfig;
pub use content::{
    ContentItem, ContentKind, ContentMetadata, ContentSource, ContentStatus, ItemUpdate,
    QueueEntry, QueueQuery, Submission, Tags,
};
pub use ids::{EntryId, RemoteId};
pub use intake::{Environment, ValidationError};
pub use sync::{SyncReport, SyncStatus};
