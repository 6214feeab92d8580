use std::sync::Arc;

use cs_core::content::QueueEntry;
use cs_core::ports::RemoteContentPort;
use tracing::{info, warn};

use crate::error::QueueError;
use crate::queue::{QueueEvent, QueueState};

/// Replaces the local queue with the remote list.
#[derive(Clone)]
pub struct LoadQueue {
    remote: Arc<dyn RemoteContentPort>,
    state: QueueState,
}

impl LoadQueue {
    pub fn new(remote: Arc<dyn RemoteContentPort>, state: QueueState) -> Self {
        Self { remote, state }
    }

    #[tracing::instrument(name = "usecase.load_queue.execute", skip(self))]
    pub async fn execute(&self) -> Result<usize, QueueError> {
        match self.remote.list_items().await {
            Ok(items) => {
                let count = items.len();
                let entries = items.into_iter().map(QueueEntry::from_remote).collect();
                self.state.store.replace_all(entries).await;
                info!(count, "queue loaded");
                self.state.events.emit(QueueEvent::QueueLoaded { count });
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "failed to load queue");
                self.state.banner.set(err.to_string()).await;
                Err(err.into())
            }
        }
    }

    /// Reload whose failure is already reported through the banner.
    pub(crate) async fn reload_quietly(&self) {
        let _ = self.execute().await;
    }
}
