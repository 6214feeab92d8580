use serde::Serialize;

use super::ContentItem;
use crate::ids::{EntryId, RemoteId};

/// One row of the local queue.
///
/// Reconciliation state lives in the variant instead of boolean flags on the
/// item, so code that needs a remote id has to match `Confirmed` to get one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueueEntry {
    /// Submitted locally; the backend has not answered yet.
    Provisional { item: ContentItem, is_new: bool },
    /// Acknowledged by the backend under `remote_id`.
    Confirmed { item: ContentItem, remote_id: RemoteId },
}

impl QueueEntry {
    pub fn provisional(item: ContentItem) -> Self {
        Self::Provisional { item, is_new: true }
    }

    /// Entry for an item that came straight from the remote list.
    pub fn from_remote(item: ContentItem) -> Self {
        let remote_id = RemoteId::from(item.id.as_str());
        Self::Confirmed { item, remote_id }
    }

    pub fn id(&self) -> &EntryId {
        &self.item().id
    }

    pub fn item(&self) -> &ContentItem {
        match self {
            Self::Provisional { item, .. } | Self::Confirmed { item, .. } => item,
        }
    }

    pub fn item_mut(&mut self) -> &mut ContentItem {
        match self {
            Self::Provisional { item, .. } | Self::Confirmed { item, .. } => item,
        }
    }

    pub fn into_item(self) -> ContentItem {
        match self {
            Self::Provisional { item, .. } | Self::Confirmed { item, .. } => item,
        }
    }

    pub fn remote_id(&self) -> Option<&RemoteId> {
        match self {
            Self::Provisional { .. } => None,
            Self::Confirmed { remote_id, .. } => Some(remote_id),
        }
    }

    pub fn is_optimistic(&self) -> bool {
        matches!(self, Self::Provisional { .. })
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Provisional { is_new: true, .. })
    }

    /// Key used when comparing against the remote list: the backend id once
    /// known, the local id before that.
    pub fn remote_key(&self) -> &str {
        match self {
            Self::Provisional { item, .. } => item.id.as_str(),
            Self::Confirmed { remote_id, .. } => remote_id.as_str(),
        }
    }

    /// Ends the entry animation. No effect on confirmed entries.
    pub fn mark_seen(&mut self) {
        if let Self::Provisional { is_new, .. } = self {
            *is_new = false;
        }
    }

    /// Turns a provisional entry into a confirmed one using the backend's copy.
    ///
    /// Already confirmed entries are returned unchanged.
    pub fn confirm(self, remote: ContentItem) -> Self {
        match self {
            Self::Provisional { item, .. } => {
                let remote_id = RemoteId::from(remote.id.as_str());
                Self::Confirmed {
                    item: item.merge_confirmed(remote),
                    remote_id,
                }
            }
            confirmed @ Self::Confirmed { .. } => confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, ContentMetadata, ContentSource, ContentStatus};
    use chrono::Utc;

    fn item(id: &str) -> ContentItem {
        let now = Utc::now();
        ContentItem {
            id: EntryId::from(id),
            kind: ContentKind::Text,
            source: ContentSource::Paste,
            status: ContentStatus::Raw,
            title: "t".into(),
            content: Some("t".into()),
            timestamp: now,
            metadata: ContentMetadata::pending(1, now),
        }
    }

    #[test]
    fn provisional_entry_is_optimistic_and_new() {
        let entry = QueueEntry::provisional(item("content-1"));
        assert!(entry.is_optimistic());
        assert!(entry.is_new());
        assert!(entry.remote_id().is_none());
        assert_eq!(entry.remote_key(), "content-1");
    }

    #[test]
    fn confirm_keeps_local_id_and_records_remote_id() {
        let entry = QueueEntry::provisional(item("content-1")).confirm(item("server-1"));
        assert!(!entry.is_optimistic());
        assert!(!entry.is_new());
        assert_eq!(entry.id().as_str(), "content-1");
        assert_eq!(entry.remote_id().map(RemoteId::as_str), Some("server-1"));
        assert_eq!(entry.remote_key(), "server-1");
    }

    #[test]
    fn mark_seen_clears_new_flag_only() {
        let mut entry = QueueEntry::provisional(item("content-1"));
        entry.mark_seen();
        assert!(!entry.is_new());
        assert!(entry.is_optimistic());
    }

    #[test]
    fn remote_entries_use_backend_id_locally() {
        let entry = QueueEntry::from_remote(item("server-7"));
        assert_eq!(entry.id().as_str(), "server-7");
        assert_eq!(entry.remote_key(), "server-7");
    }
}
