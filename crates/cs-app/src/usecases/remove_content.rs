use std::sync::Arc;

use cs_core::content::QueueEntry;
use cs_core::ids::EntryId;
use cs_core::ports::RemoteContentPort;
use tracing::{debug, info, warn};

use crate::error::QueueError;
use crate::queue::{QueueEvent, QueueState};

/// Use case for deleting a single item optimistically.
///
/// The entry leaves the queue before the remote call. A not-found answer means
/// the backend already lost it, which counts as success; any other failure puts
/// the entry back at the head of the queue.
#[derive(Clone)]
pub struct RemoveContent {
    remote: Arc<dyn RemoteContentPort>,
    state: QueueState,
}

impl RemoveContent {
    pub fn new(remote: Arc<dyn RemoteContentPort>, state: QueueState) -> Self {
        Self { remote, state }
    }

    #[tracing::instrument(name = "usecase.remove_content.execute", skip(self), fields(id = %id))]
    pub async fn execute(&self, id: &EntryId) -> Result<(), QueueError> {
        let Some(removed) = self.state.store.remove(id).await else {
            debug!("entry not in queue, nothing to remove");
            return Ok(());
        };

        let QueueEntry::Confirmed { remote_id, .. } = &removed else {
            debug!("provisional entry removed locally");
            self.state.events.emit(QueueEvent::ItemRemoved { id: id.clone() });
            return Ok(());
        };

        match self.remote.delete_item(remote_id).await {
            Ok(()) => {
                info!(remote_id = %remote_id, "item deleted");
                self.state.events.emit(QueueEvent::ItemRemoved { id: id.clone() });
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!(remote_id = %remote_id, "item already absent on the backend");
                self.state.events.emit(QueueEvent::ItemRemoved { id: id.clone() });
                Ok(())
            }
            Err(err) => {
                warn!(remote_id = %remote_id, error = %err, "delete failed, restoring entry");
                self.state.store.push_front(removed.clone()).await;
                self.state.events.emit(QueueEvent::RemoveRolledBack { id: id.clone() });
                self.state.banner.set(err.to_string()).await;
                Err(err.into())
            }
        }
    }
}
