use std::sync::Arc;

use cs_core::content::QueueEntry;
use cs_core::ids::EntryId;
use cs_core::ports::{RemoteContentPort, RemoteError};
use tracing::{info, warn};

use crate::queue::{QueueEvent, QueueState};
use crate::usecases::LoadQueue;

/// Use case that prepares a multi-item delete.
///
/// Nothing changes until the returned [`BulkDeleteRequest`] is confirmed, so a
/// front end can put a confirmation dialog between selection and deletion.
#[derive(Clone)]
pub struct BulkRemoveContent {
    remote: Arc<dyn RemoteContentPort>,
    state: QueueState,
}

impl BulkRemoveContent {
    pub fn new(remote: Arc<dyn RemoteContentPort>, state: QueueState) -> Self {
        Self { remote, state }
    }

    pub fn execute(&self, ids: Vec<EntryId>) -> BulkDeleteRequest {
        BulkDeleteRequest {
            ids,
            remote: Arc::clone(&self.remote),
            state: self.state.clone(),
        }
    }
}

#[derive(Debug)]
pub enum BulkDeleteOutcome {
    Completed {
        deleted: usize,
    },
    /// A delete failed; the queue was reloaded from the remote.
    Resynced {
        deleted: usize,
        failed_id: EntryId,
        error: RemoteError,
    },
}

/// A pending bulk delete. Resolved at most once.
pub struct BulkDeleteRequest {
    ids: Vec<EntryId>,
    remote: Arc<dyn RemoteContentPort>,
    state: QueueState,
}

impl std::fmt::Debug for BulkDeleteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkDeleteRequest").field("ids", &self.ids).finish()
    }
}

impl BulkDeleteRequest {
    pub fn ids(&self) -> &[EntryId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[tracing::instrument(name = "usecase.bulk_remove_content.confirm", skip(self), fields(count = self.ids.len()))]
    pub async fn confirm(self) -> BulkDeleteOutcome {
        let removed = self.state.store.remove_many(&self.ids).await;
        let mut deleted = 0;

        for entry in &removed {
            let QueueEntry::Confirmed { item, remote_id } = entry else {
                deleted += 1;
                continue;
            };
            match self.remote.delete_item(remote_id).await {
                Ok(()) => deleted += 1,
                Err(err) if err.is_not_found() => deleted += 1,
                Err(err) => {
                    warn!(remote_id = %remote_id, error = %err, "bulk delete failed, reloading queue");
                    self.state.banner.set(err.to_string()).await;
                    LoadQueue::new(Arc::clone(&self.remote), self.state.clone())
                        .reload_quietly()
                        .await;
                    self.state.events.emit(QueueEvent::BulkDeleteResynced {
                        deleted,
                        failed: item.id.clone(),
                    });
                    return BulkDeleteOutcome::Resynced {
                        deleted,
                        failed_id: item.id.clone(),
                        error: err,
                    };
                }
            }
        }

        info!(deleted, "bulk delete completed");
        self.state.events.emit(QueueEvent::BulkDeleteCompleted { deleted });
        BulkDeleteOutcome::Completed { deleted }
    }

    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{remote_item, server_error, MockRemote};
    use mockall::Sequence;

    fn confirmed(id: &str) -> QueueEntry {
        QueueEntry::from_remote(remote_item(id, id))
    }

    async fn state_with(entries: Vec<QueueEntry>) -> QueueState {
        let state = QueueState::new();
        state.store.replace_all(entries).await;
        state
    }

    #[tokio::test]
    async fn nothing_happens_before_confirmation() {
        let mut remote = MockRemote::new();
        remote.expect_delete_item().times(0);
        let state = state_with(vec![confirmed("a"), confirmed("b")]).await;
        let uc = BulkRemoveContent::new(Arc::new(remote), state.clone());

        let request = uc.execute(vec![EntryId::from("a"), EntryId::from("b")]);
        assert_eq!(request.len(), 2);
        assert_eq!(state.store.len().await, 2);

        request.cancel();
        assert_eq!(state.store.len().await, 2);
    }

    #[tokio::test]
    async fn confirmed_request_deletes_every_selected_item() {
        let mut remote = MockRemote::new();
        remote.expect_delete_item().times(2).returning(|_| Ok(()));
        let state = state_with(vec![confirmed("a"), confirmed("b"), confirmed("c")]).await;
        let uc = BulkRemoveContent::new(Arc::new(remote), state.clone());

        let outcome = uc.execute(vec![EntryId::from("a"), EntryId::from("c")]).confirm().await;

        assert!(matches!(outcome, BulkDeleteOutcome::Completed { deleted: 2 }));
        let ids: Vec<_> = state.store.snapshot().await.iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[tokio::test]
    async fn failure_reloads_from_remote() {
        let mut remote = MockRemote::new();
        let mut seq = Sequence::new();
        remote
            .expect_delete_item()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        remote
            .expect_delete_item()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(server_error()));
        remote
            .expect_list_items()
            .times(1)
            .returning(|| Ok(vec![remote_item("b", "b"), remote_item("c", "c")]));
        let state = state_with(vec![confirmed("a"), confirmed("b"), confirmed("c")]).await;
        let mut events = state.events.subscribe();
        let uc = BulkRemoveContent::new(Arc::new(remote), state.clone());

        let outcome = uc
            .execute(vec![EntryId::from("a"), EntryId::from("b")])
            .confirm()
            .await;

        match outcome {
            BulkDeleteOutcome::Resynced { deleted, failed_id, .. } => {
                assert_eq!(deleted, 1);
                assert_eq!(failed_id.as_str(), "b");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(state.store.len().await, 2);
        assert!(state.banner.current().await.is_some());

        let mut saw_resync = false;
        while let Ok(event) = events.try_recv() {
            saw_resync |= matches!(event, QueueEvent::BulkDeleteResynced { .. });
        }
        assert!(saw_resync);
    }

    #[tokio::test]
    async fn provisional_and_absent_entries_skip_the_remote() {
        let mut remote = MockRemote::new();
        remote
            .expect_delete_item()
            .returning(|_| Err(RemoteError::NotFound("gone".into())));
        let state = state_with(vec![
            QueueEntry::provisional(remote_item("content-1", "x")),
            confirmed("a"),
        ])
        .await;
        let uc = BulkRemoveContent::new(Arc::new(remote), state.clone());

        let outcome = uc
            .execute(vec![
                EntryId::from("content-1"),
                EntryId::from("a"),
                EntryId::from("never-there"),
            ])
            .confirm()
            .await;

        assert!(matches!(outcome, BulkDeleteOutcome::Completed { deleted: 2 }));
        assert!(state.store.is_empty().await);
    }
}
