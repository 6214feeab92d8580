use std::fmt;
use std::sync::Arc;

use cs_core::content::{
    ContentItem, ContentMetadata, ContentStatus, Payload, QueueEntry, SubmitMethod, Submission,
};
use cs_core::ids::{EntryId, RemoteId};
use cs_core::intake::{plan_file_content, validate_submission, Environment, FileContentPlan};
use cs_core::ports::{AddItemRequest, ClockPort, PayloadReaderPort, RemoteContentPort, RemoteError};
use tracing::{debug, info, warn};

use crate::error::QueueError;
use crate::queue::{QueueEvent, QueueState};

/// What happened to a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend accepted the item; this is the confirmed queue entry.
    Added(QueueEntry),
    /// The backend already holds this content. Nothing was queued; the caller
    /// decides whether to force it in.
    Duplicate(DuplicateResolution),
}

impl SubmitOutcome {
    pub fn entry(&self) -> Option<&QueueEntry> {
        match self {
            Self::Added(entry) => Some(entry),
            Self::Duplicate(_) => None,
        }
    }
}

/// Use case for adding content with an optimistic queue entry.
///
/// Order of effects:
/// 1. validate (nothing is touched on failure);
/// 2. insert a provisional entry at the head of the queue;
/// 3. turn the payload into the text sent to the backend;
/// 4. call the remote add;
/// 5. on success confirm the same slot, keeping its local id;
/// 6. on failure drop the slot, then either hand back a duplicate resolution
///    or set the error banner and return the error.
#[derive(Clone)]
pub struct SubmitContent {
    remote: Arc<dyn RemoteContentPort>,
    reader: Arc<dyn PayloadReaderPort>,
    clock: Arc<dyn ClockPort>,
    state: QueueState,
    environment: Environment,
}

impl SubmitContent {
    pub fn new(
        remote: Arc<dyn RemoteContentPort>,
        reader: Arc<dyn PayloadReaderPort>,
        clock: Arc<dyn ClockPort>,
        state: QueueState,
        environment: Environment,
    ) -> Self {
        Self {
            remote,
            reader,
            clock,
            state,
            environment,
        }
    }

    #[tracing::instrument(
        name = "usecase.submit_content.execute",
        skip(self, submission),
        fields(method = submission.method.as_str())
    )]
    pub async fn execute(&self, submission: Submission) -> Result<SubmitOutcome, QueueError> {
        self.run(submission, false).await
    }

    /// Same flow as [`execute`](Self::execute) with the backend duplicate check disabled.
    #[tracing::instrument(
        name = "usecase.submit_content.force",
        skip(self, submission),
        fields(method = submission.method.as_str())
    )]
    pub async fn force(&self, submission: Submission) -> Result<SubmitOutcome, QueueError> {
        self.run(submission, true).await
    }

    async fn run(&self, submission: Submission, force: bool) -> Result<SubmitOutcome, QueueError> {
        if let Err(err) = validate_submission(&submission, self.environment) {
            self.state.banner.set(err.to_string()).await;
            return Err(err.into());
        }

        let _in_flight = self.state.begin_submission();
        let provisional = self.provisional_item(&submission);
        let local_id = provisional.id.clone();

        self.state
            .store
            .push_front(QueueEntry::provisional(provisional))
            .await;
        self.state.events.emit(QueueEvent::ItemQueued {
            id: local_id.clone(),
        });
        debug!(id = %local_id, "provisional entry queued");

        match self.send(&submission, force).await {
            Ok(remote_item) => Ok(SubmitOutcome::Added(self.confirm(&local_id, remote_item).await)),
            Err(err) => {
                self.state.store.remove(&local_id).await;
                self.state.events.emit(QueueEvent::ItemRolledBack {
                    id: local_id.clone(),
                });

                match err {
                    QueueError::Remote(RemoteError::Duplicate {
                        message,
                        existing_id,
                    }) if !force => {
                        info!(id = %local_id, "backend reported duplicate content");
                        self.state.events.emit(QueueEvent::DuplicateDetected { id: local_id });
                        Ok(SubmitOutcome::Duplicate(DuplicateResolution {
                            submission,
                            existing_id,
                            message,
                            submitter: self.clone(),
                        }))
                    }
                    other => {
                        warn!(id = %local_id, error = %other, "submission failed, provisional entry removed");
                        self.state.banner.set(other.to_string()).await;
                        Err(other)
                    }
                }
            }
        }
    }

    fn provisional_item(&self, submission: &Submission) -> ContentItem {
        let now = self.clock.now();
        let mut metadata = ContentMetadata::pending(submission.size_bytes(), now);
        if submission.method == SubmitMethod::Url {
            metadata.url = submission.text().map(|u| u.trim().to_string());
        }
        if let Some(file) = submission.file() {
            metadata.file_type = file.mime.clone();
        }

        ContentItem {
            id: EntryId::new(),
            kind: submission.kind(),
            source: submission.source(),
            status: ContentStatus::Raw,
            title: submission.provisional_title(),
            content: submission.text().map(str::to_string),
            timestamp: now,
            metadata,
        }
    }

    async fn send(&self, submission: &Submission, force: bool) -> Result<ContentItem, QueueError> {
        let request = AddItemRequest {
            method: submission.method,
            content: self.normalized_content(submission).await?,
            url: match (&submission.method, &submission.payload) {
                (SubmitMethod::Url, Payload::Text(url)) => Some(url.trim().to_string()),
                _ => None,
            },
            filename: submission.file().map(|f| f.name.clone()),
            force,
        };

        Ok(self.remote.add_item(&request).await?)
    }

    async fn normalized_content(&self, submission: &Submission) -> Result<String, QueueError> {
        match &submission.payload {
            Payload::Text(text) if submission.method == SubmitMethod::Url => Ok(text.trim().to_string()),
            Payload::Text(text) => Ok(text.clone()),
            Payload::File(file) => match plan_file_content(file) {
                FileContentPlan::ReadText => self
                    .reader
                    .read_text(file)
                    .await
                    .map_err(|e| QueueError::Payload(format!("{}: {e:#}", file.name))),
                FileContentPlan::Describe(description) => Ok(description),
            },
        }
    }

    async fn confirm(&self, local_id: &EntryId, remote_item: ContentItem) -> QueueEntry {
        let backend_id = RemoteId::from(remote_item.id.as_str());
        let fallback = remote_item.clone();

        let confirmed = self
            .state
            .store
            .mutate(|entries| {
                let idx = entries.iter().position(|e| e.id() == local_id)?;
                let entry = entries.remove(idx).confirm(remote_item);
                entries.insert(idx, entry.clone());
                Some(entry)
            })
            .await;

        match confirmed {
            Some(entry) => {
                info!(id = %local_id, backend_id = %backend_id, "provisional entry confirmed");
                self.state.events.emit(QueueEvent::ItemConfirmed {
                    id: local_id.clone(),
                });
                entry
            }
            None => {
                // Removed locally while the request was in flight.
                warn!(id = %local_id, backend_id = %backend_id, "confirmed item no longer queued");
                let mut item = fallback;
                item.id = local_id.clone();
                QueueEntry::Confirmed {
                    item,
                    remote_id: backend_id,
                }
            }
        }
    }
}

/// A submission the backend rejected as duplicate, waiting for the user.
///
/// `approve` and `cancel` consume the resolution, so it is settled at most once.
pub struct DuplicateResolution {
    submission: Submission,
    existing_id: Option<RemoteId>,
    message: String,
    submitter: SubmitContent,
}

impl DuplicateResolution {
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn existing_id(&self) -> Option<&RemoteId> {
        self.existing_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Adds the content anyway.
    pub async fn approve(self) -> Result<SubmitOutcome, QueueError> {
        self.submitter.force(self.submission).await
    }

    pub fn cancel(self) {
        debug!(method = self.submission.method.as_str(), "duplicate submission dropped");
    }
}

impl fmt::Debug for DuplicateResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateResolution")
            .field("submission", &self.submission)
            .field("existing_id", &self.existing_id)
            .field("message", &self.message)
            .finish()
    }
}
