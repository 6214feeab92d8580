use std::sync::Arc;

use cs_core::content::ItemUpdate;
use cs_core::ids::EntryId;
use cs_core::ports::ClockPort;
use tracing::debug;

use crate::queue::{QueueEvent, QueueState};

/// Applies one partial update to several entries. Local only.
#[derive(Clone)]
pub struct BulkUpdateContent {
    clock: Arc<dyn ClockPort>,
    state: QueueState,
}

impl BulkUpdateContent {
    pub fn new(clock: Arc<dyn ClockPort>, state: QueueState) -> Self {
        Self { clock, state }
    }

    /// Returns the ids that were found and updated.
    #[tracing::instrument(name = "usecase.bulk_update_content.execute", skip(self, update), fields(count = ids.len()))]
    pub async fn execute(&self, ids: &[EntryId], update: &ItemUpdate) -> Vec<EntryId> {
        let now = self.clock.now();
        let updated: Vec<EntryId> = self
            .state
            .store
            .mutate(|entries| {
                entries
                    .iter_mut()
                    .filter(|e| ids.contains(e.id()))
                    .map(|e| {
                        update.apply(e.item_mut(), now);
                        e.id().clone()
                    })
                    .collect()
            })
            .await;

        debug!(updated = updated.len(), "bulk update applied");
        for id in &updated {
            self.state.events.emit(QueueEvent::ItemUpdated { id: id.clone() });
        }
        updated
    }
}
