use cs_core::ids::EntryId;
use cs_core::sync::SyncStatus;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 256;

/// Facts published by the queue use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    ItemQueued { id: EntryId },
    ItemConfirmed { id: EntryId },
    ItemRolledBack { id: EntryId },
    DuplicateDetected { id: EntryId },
    ItemUpdated { id: EntryId },
    UpdateRolledBack { id: EntryId },
    ItemRemoved { id: EntryId },
    RemoveRolledBack { id: EntryId },
    BulkDeleteCompleted { deleted: usize },
    /// A bulk delete failed part way and the queue was reloaded from the remote.
    BulkDeleteResynced { deleted: usize, failed: EntryId },
    QueueLoaded { count: usize },
    SyncChecked { status: SyncStatus },
}

#[derive(Clone)]
pub struct QueueEvents {
    tx: broadcast::Sender<QueueEvent>,
}

impl QueueEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: QueueEvent) {
        // No subscribers is fine.
        let _ = self.tx.send(event);
    }
}

impl Default for QueueEvents {
    fn default() -> Self {
        Self::new()
    }
}
