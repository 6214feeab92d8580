//! ID type wrappers for type safety.

mod content;
mod id_macro;

pub use content::{EntryId, RemoteId};
