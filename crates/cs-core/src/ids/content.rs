use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Local identity of a queue entry.
///
/// Generated on submission and kept for the whole session, even after the
/// backend has assigned its own id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

/// Identity assigned by the remote content service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteId(String);

impl_id!(EntryId, RemoteId);

impl EntryId {
    pub fn new() -> Self {
        Self(format!("content-{}", uuid::Uuid::new_v4().simple()))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Items fetched from the remote have no separate local identity.
impl From<&RemoteId> for EntryId {
    fn from(id: &RemoteId) -> Self {
        Self(id.0.clone())
    }
}
