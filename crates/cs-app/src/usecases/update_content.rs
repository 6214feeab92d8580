use std::sync::Arc;

use cs_core::content::{ItemUndo, ItemUpdate};
use cs_core::ids::{EntryId, RemoteId};
use cs_core::ports::{ClockPort, RemoteContentPort};
use tracing::{debug, warn};

use crate::error::QueueError;
use crate::queue::{QueueEvent, QueueState};

/// Use case for editing a queued item (title, tags, category, ...).
///
/// The local copy changes first. Provisional entries stop there, since the
/// backend does not know them yet. Confirmed entries are written through to
/// the remote; when that fails only the fields this update wrote are reverted,
/// and only where nothing newer has replaced them.
#[derive(Clone)]
pub struct UpdateContent {
    remote: Arc<dyn RemoteContentPort>,
    clock: Arc<dyn ClockPort>,
    state: QueueState,
}

impl UpdateContent {
    pub fn new(remote: Arc<dyn RemoteContentPort>, clock: Arc<dyn ClockPort>, state: QueueState) -> Self {
        Self {
            remote,
            clock,
            state,
        }
    }

    #[tracing::instrument(name = "usecase.update_content.execute", skip(self, update), fields(id = %id))]
    pub async fn execute(&self, id: &EntryId, update: ItemUpdate) -> Result<(), QueueError> {
        let now = self.clock.now();

        let applied: Option<(ItemUndo, Option<RemoteId>)> = self
            .state
            .store
            .mutate(|entries| {
                let entry = entries.iter_mut().find(|e| e.id() == id)?;
                let undo = update.apply_with_undo(entry.item_mut(), now);
                Some((undo, entry.remote_id().cloned()))
            })
            .await;

        let Some((undo, remote_id)) = applied else {
            return Err(QueueError::NotInQueue(id.clone()));
        };

        let Some(remote_id) = remote_id else {
            debug!("entry still provisional, update kept local");
            self.state.events.emit(QueueEvent::ItemUpdated { id: id.clone() });
            return Ok(());
        };

        match self.remote.update_item(&remote_id, &update).await {
            Ok(()) => {
                self.state.events.emit(QueueEvent::ItemUpdated { id: id.clone() });
                Ok(())
            }
            Err(err) => {
                warn!(remote_id = %remote_id, error = %err, "remote update failed, reverting its fields");
                self.state
                    .store
                    .mutate(|entries| {
                        if let Some(entry) = entries.iter_mut().find(|e| e.id() == id) {
                            undo.revert(entry.item_mut());
                        }
                    })
                    .await;
                self.state.events.emit(QueueEvent::UpdateRolledBack { id: id.clone() });
                self.state.banner.set(err.to_string()).await;
                Err(err.into())
            }
        }
    }
}
