use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use cs_core::content::{ContentItem, ItemUpdate, QueueEntry, QueueQuery, Submission};
use cs_core::ids::EntryId;
use cs_core::ports::{PayloadReaderPort, SettingsPort};
use cs_core::settings::{SettingsPatch, UserSettings};
use cs_core::sync::{SyncReport, SyncStatus};
use tokio::sync::broadcast;

use crate::deps::QueueDeps;
use crate::error::QueueError;
use crate::queue::{QueueEvent, QueueState};
use crate::usecases::settings::{ClearLogo, GetSettings, UpdateLogo, UpdateSettings};
use crate::usecases::{
    BulkDeleteRequest, BulkRemoveContent, BulkUpdateContent, LoadQueue, RemoveContent,
    SearchContent, SubmitContent, SubmitOutcome, SyncAuditor, UpdateContent,
};

/// Entry point for front ends: one queue, its use cases and its auditor.
///
/// Cloning is cheap and every clone shares the same queue state.
#[derive(Clone)]
pub struct ContentQueue {
    state: QueueState,
    submit: SubmitContent,
    update: UpdateContent,
    remove: RemoveContent,
    bulk_remove: BulkRemoveContent,
    bulk_update: BulkUpdateContent,
    load: LoadQueue,
    search: SearchContent,
    auditor: SyncAuditor,
    settings: Arc<dyn SettingsPort>,
    reader: Arc<dyn PayloadReaderPort>,
}

impl ContentQueue {
    pub fn new(deps: QueueDeps) -> Self {
        let QueueDeps {
            remote,
            reader,
            settings,
            clock,
            environment,
        } = deps;
        let state = QueueState::new();

        Self {
            submit: SubmitContent::new(
                remote.clone(),
                reader.clone(),
                clock.clone(),
                state.clone(),
                environment,
            ),
            update: UpdateContent::new(remote.clone(), clock.clone(), state.clone()),
            remove: RemoveContent::new(remote.clone(), state.clone()),
            bulk_remove: BulkRemoveContent::new(remote.clone(), state.clone()),
            bulk_update: BulkUpdateContent::new(clock.clone(), state.clone()),
            load: LoadQueue::new(remote.clone(), state.clone()),
            search: SearchContent::new(remote.clone()),
            auditor: SyncAuditor::new(remote, clock, state.clone()),
            settings,
            reader,
            state,
        }
    }

    // Queue operations

    pub async fn load(&self) -> Result<usize, QueueError> {
        self.load.execute().await
    }

    pub async fn refresh(&self) -> Result<usize, QueueError> {
        self.load.execute().await
    }

    pub async fn submit(&self, submission: Submission) -> Result<SubmitOutcome, QueueError> {
        self.submit.execute(submission).await
    }

    pub async fn update(&self, id: &EntryId, update: ItemUpdate) -> Result<(), QueueError> {
        self.update.execute(id, update).await
    }

    pub async fn bulk_update(&self, ids: &[EntryId], update: &ItemUpdate) -> Vec<EntryId> {
        self.bulk_update.execute(ids, update).await
    }

    pub async fn remove(&self, id: &EntryId) -> Result<(), QueueError> {
        self.remove.execute(id).await
    }

    /// Prepares a bulk delete; nothing is removed until the request is confirmed.
    pub fn bulk_remove(&self, ids: Vec<EntryId>) -> BulkDeleteRequest {
        self.bulk_remove.execute(ids)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ContentItem>, QueueError> {
        self.search.execute(query).await
    }

    pub async fn clear(&self) {
        self.state.store.clear().await;
    }

    /// Marks a provisional entry's entry animation as finished.
    pub async fn mark_seen(&self, id: &EntryId) {
        self.state
            .store
            .mutate(|entries| {
                if let Some(entry) = entries.iter_mut().find(|e| e.id() == id) {
                    entry.mark_seen();
                }
            })
            .await;
    }

    // Queue views

    pub async fn entries(&self) -> Vec<QueueEntry> {
        self.state.store.snapshot().await
    }

    pub async fn get(&self, id: &EntryId) -> Option<QueueEntry> {
        self.state.store.get(id).await
    }

    pub async fn query(&self, query: &QueueQuery) -> Vec<QueueEntry> {
        let entries = self.state.store.snapshot().await;
        query.apply(&entries).into_iter().cloned().collect()
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.banner.current().await
    }

    pub async fn clear_error(&self) {
        self.state.banner.clear().await;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.state.events.subscribe()
    }

    // Sync auditing

    pub async fn check_sync(&self) -> SyncReport {
        self.auditor.check_sync().await
    }

    pub async fn sync_status(&self) -> SyncStatus {
        self.auditor.status().await
    }

    pub fn auditor(&self) -> &SyncAuditor {
        &self.auditor
    }

    // Branding settings

    pub async fn settings(&self) -> Result<UserSettings> {
        GetSettings::new(self.settings.clone()).execute().await
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<UserSettings> {
        UpdateSettings::new(self.settings.clone()).execute(patch).await
    }

    pub async fn update_logo(&self, path: &Path) -> Result<String> {
        UpdateLogo::new(self.settings.clone(), self.reader.clone())
            .execute(path)
            .await
    }

    pub async fn clear_logo(&self) -> Result<()> {
        ClearLogo::new(self.settings.clone()).execute().await
    }
}
