use std::sync::Arc;

use cs_core::content::QueueEntry;
use cs_core::ids::EntryId;
use tokio::sync::RwLock;

/// Ordered in-memory queue, newest first.
///
/// Every mutation runs under the write lock against the current contents, so
/// callbacks that resolve out of order never work from a stale copy.
#[derive(Clone, Default)]
pub struct QueueStore {
    entries: Arc<RwLock<Vec<QueueEntry>>>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<QueueEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn get(&self, id: &EntryId) -> Option<QueueEntry> {
        self.entries.read().await.iter().find(|e| e.id() == id).cloned()
    }

    /// Applies `f` to the live contents under the write lock.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut Vec<QueueEntry>) -> R) -> R {
        let mut entries = self.entries.write().await;
        f(&mut entries)
    }

    pub async fn push_front(&self, entry: QueueEntry) {
        self.mutate(|entries| entries.insert(0, entry)).await;
    }

    pub async fn remove(&self, id: &EntryId) -> Option<QueueEntry> {
        self.mutate(|entries| {
            let idx = entries.iter().position(|e| e.id() == id)?;
            Some(entries.remove(idx))
        })
        .await
    }

    /// Removes every entry whose id is in `ids`, returning them in queue order.
    pub async fn remove_many(&self, ids: &[EntryId]) -> Vec<QueueEntry> {
        self.mutate(|entries| {
            let (removed, kept): (Vec<_>, Vec<_>) =
                std::mem::take(entries).into_iter().partition(|e| ids.contains(e.id()));
            *entries = kept;
            removed
        })
        .await
    }

    pub async fn replace_all(&self, new_entries: Vec<QueueEntry>) {
        self.mutate(|entries| *entries = new_entries).await;
    }

    pub async fn clear(&self) {
        self.mutate(Vec::clear).await;
    }
}
