//! End-to-end reconciliation behaviour of `ContentQueue` against a fake remote.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use cs_app::{BulkDeleteOutcome, ContentQueue, QueueDeps, QueueEvent, SubmitOutcome};
use cs_core::content::{
    ContentItem, ContentKind, ContentMetadata, ContentSource, ContentStatus, FileRef, ItemUpdate,
    Submission,
};
use cs_core::ids::{EntryId, RemoteId};
use cs_core::intake::{Environment, ValidationError, MIB};
use cs_core::ports::{
    AddItemRequest, ClockPort, PayloadReaderPort, RemoteContentPort, RemoteError, SettingsPort,
};
use cs_core::settings::UserSettings;
use tokio::sync::Semaphore;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Remote whose add calls block until the test releases them.
#[derive(Default)]
struct FakeRemote {
    items: Mutex<Vec<ContentItem>>,
    add_gate: Option<Semaphore>,
    add_results: Mutex<VecDeque<Result<ContentItem, RemoteError>>>,
    delete_results: Mutex<VecDeque<Result<(), RemoteError>>>,
    add_requests: Mutex<Vec<AddItemRequest>>,
    deleted: Mutex<Vec<RemoteId>>,
}

impl FakeRemote {
    fn gated() -> Self {
        Self {
            add_gate: Some(Semaphore::new(0)),
            ..Default::default()
        }
    }

    fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    fn release_adds(&self, n: usize) {
        if let Some(gate) = &self.add_gate {
            gate.add_permits(n);
        }
    }

    fn queue_add(&self, result: Result<ContentItem, RemoteError>) {
        self.add_results.lock().unwrap().push_back(result);
    }

    fn queue_delete(&self, result: Result<(), RemoteError>) {
        self.delete_results.lock().unwrap().push_back(result);
    }

    fn add_requests(&self) -> Vec<AddItemRequest> {
        self.add_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteContentPort for FakeRemote {
    async fn list_items(&self) -> Result<Vec<ContentItem>, RemoteError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn add_item(&self, request: &AddItemRequest) -> Result<ContentItem, RemoteError> {
        self.add_requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.add_gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let result = self
            .add_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(backend_item("server-default", &request.content)));
        if let Ok(item) = &result {
            self.items.lock().unwrap().insert(0, item.clone());
        }
        result
    }

    async fn update_item(&self, _id: &RemoteId, _update: &ItemUpdate) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn delete_item(&self, id: &RemoteId) -> Result<(), RemoteError> {
        let result = self.delete_results.lock().unwrap().pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            self.deleted.lock().unwrap().push(id.clone());
            self.items.lock().unwrap().retain(|item| item.id.as_str() != id.as_str());
        }
        result
    }

    async fn search_items(&self, _query: &str) -> Result<Vec<ContentItem>, RemoteError> {
        Ok(Vec::new())
    }
}

struct NoFiles;

#[async_trait]
impl PayloadReaderPort for NoFiles {
    async fn read_text(&self, file: &FileRef) -> anyhow::Result<String> {
        anyhow::bail!("unexpected read of {}", file.name)
    }

    async fn read_bytes(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("unexpected read of {}", path.display())
    }
}

struct MemorySettings(Mutex<UserSettings>);

#[async_trait]
impl SettingsPort for MemorySettings {
    async fn load(&self) -> anyhow::Result<UserSettings> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()> {
        *self.0.lock().unwrap() = settings.clone();
        Ok(())
    }
}

struct FixedClock;

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }
}

fn backend_item(id: &str, text: &str) -> ContentItem {
    let at = Utc.timestamp_opt(1_700_000_500, 0).unwrap();
    let mut metadata = ContentMetadata::pending(text.len() as u64, at);
    metadata.content_hash = format!("sha-{id}");
    metadata.word_count = Some(text.split_whitespace().count());
    ContentItem {
        id: EntryId::from(id),
        kind: ContentKind::Text,
        source: ContentSource::Paste,
        status: ContentStatus::Processed,
        title: String::new(),
        content: Some(text.into()),
        timestamp: at,
        metadata,
    }
}

fn queue_with(remote: Arc<FakeRemote>, environment: Environment) -> ContentQueue {
    ContentQueue::new(QueueDeps {
        remote,
        reader: Arc::new(NoFiles),
        settings: Arc::new(MemorySettings(Mutex::new(UserSettings::default()))),
        clock: Arc::new(FixedClock),
        environment,
    })
}

async fn wait_for_len(queue: &ContentQueue, len: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while queue.entries().await.len() != len {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("queue never reached expected length");
}

fn duplicate() -> RemoteError {
    RemoteError::Duplicate {
        message: "Content already exists".into(),
        existing_id: Some(RemoteId::from("server-old")),
    }
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paste_is_visible_while_pending_then_confirmed() {
    let remote = Arc::new(FakeRemote::gated());
    remote.queue_add(Ok(backend_item("server-42", "Hello world")));
    let queue = queue_with(remote.clone(), Environment::Production);

    let task = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.submit(Submission::paste("Hello world")).await })
    };
    wait_for_len(&queue, 1).await;

    let pending = queue.entries().await.remove(0);
    assert!(pending.is_optimistic());
    assert!(pending.is_new());
    assert_eq!(pending.item().title, "Hello world");
    assert_eq!(pending.item().content.as_deref(), Some("Hello world"));
    assert_eq!(pending.item().status, ContentStatus::Raw);
    assert!(pending.item().metadata.is_hash_pending());
    assert!(queue.is_processing());

    remote.release_adds(1);
    let outcome = task.await.unwrap().unwrap();

    let confirmed = outcome.entry().expect("added").clone();
    assert_eq!(confirmed.id(), pending.id());
    assert_eq!(confirmed.remote_id().map(RemoteId::as_str), Some("server-42"));
    assert!(!confirmed.is_optimistic());
    assert!(!confirmed.is_new());
    assert_eq!(confirmed.item().metadata.content_hash, "sha-server-42");
    assert!(!queue.is_processing());
    assert_eq!(queue.entries().await, vec![confirmed]);
}

#[tokio::test]
async fn concurrent_submissions_each_keep_their_own_slot() {
    let remote = Arc::new(FakeRemote::gated());
    remote.queue_add(Ok(backend_item("server-1", "first")));
    remote.queue_add(Err(RemoteError::Status {
        status: 500,
        message: "boom".into(),
    }));
    let queue = queue_with(remote.clone(), Environment::Production);

    let first = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.submit(Submission::paste("first")).await })
    };
    wait_for_len(&queue, 1).await;
    let second = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.submit(Submission::paste("second")).await })
    };
    wait_for_len(&queue, 2).await;

    remote.release_adds(1);
    let first = first.await.unwrap();
    remote.release_adds(1);
    let second = second.await.unwrap();

    assert!(first.is_ok());
    assert!(second.is_err());
    let entries = queue.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].remote_id().map(RemoteId::as_str), Some("server-1"));
    assert!(queue.last_error().await.is_some());
}

#[tokio::test]
async fn failed_submission_leaves_no_entry() {
    let remote = Arc::new(FakeRemote::default());
    remote.queue_add(Err(RemoteError::Transport("connection refused".into())));
    let queue = queue_with(remote, Environment::Production);
    let mut events = queue.subscribe();

    let result = queue.submit(Submission::paste("lost")).await;

    assert!(result.is_err());
    assert!(queue.entries().await.is_empty());
    assert!(queue.last_error().await.is_some());
    assert!(matches!(events.recv().await.unwrap(), QueueEvent::ItemQueued { .. }));
    assert!(matches!(events.recv().await.unwrap(), QueueEvent::ItemRolledBack { .. }));

    queue.clear_error().await;
    assert!(queue.last_error().await.is_none());
}

#[tokio::test]
async fn duplicate_short_circuits_without_banner() {
    let remote = Arc::new(FakeRemote::default());
    remote.queue_add(Err(duplicate()));
    remote.queue_add(Ok(backend_item("server-forced", "again")));
    let queue = queue_with(remote.clone(), Environment::Production);

    let outcome = queue.submit(Submission::paste("again")).await.unwrap();

    let SubmitOutcome::Duplicate(resolution) = outcome else {
        panic!("expected duplicate prompt");
    };
    assert!(queue.entries().await.is_empty());
    assert!(queue.last_error().await.is_none());
    assert_eq!(resolution.existing_id().map(RemoteId::as_str), Some("server-old"));

    let forced = resolution.approve().await.unwrap();

    assert!(forced.entry().is_some());
    let requests = remote.add_requests();
    assert_eq!(requests.len(), 2);
    assert!(!requests[0].force);
    assert!(requests[1].force);
    assert_eq!(queue.entries().await.len(), 1);
}

#[tokio::test]
async fn cancelled_duplicate_changes_nothing() {
    let remote = Arc::new(FakeRemote::default());
    remote.queue_add(Err(duplicate()));
    let queue = queue_with(remote.clone(), Environment::Production);

    if let SubmitOutcome::Duplicate(resolution) = queue.submit(Submission::paste("x")).await.unwrap() {
        resolution.cancel();
    }

    assert_eq!(remote.add_requests().len(), 1);
    assert!(queue.entries().await.is_empty());
}

#[tokio::test]
async fn oversized_video_in_production_is_rejected_up_front() {
    let remote = Arc::new(FakeRemote::default());
    let queue = queue_with(remote.clone(), Environment::Production);
    let movie = FileRef {
        name: "movie.mp4".into(),
        size_bytes: 200 * MIB,
        mime: Some("video/mp4".into()),
        path: PathBuf::from("/videos/movie.mp4"),
    };

    let err = queue.submit(Submission::upload(movie)).await.unwrap_err();

    assert!(matches!(
        err,
        cs_app::QueueError::Validation(ValidationError::FileTooLarge { video: true, .. })
    ));
    assert_eq!(
        err.to_string(),
        "File size (200MB) exceeds limit of 100MB for video files"
    );
    assert!(remote.add_requests().is_empty());
    assert!(queue.entries().await.is_empty());
}

#[tokio::test]
async fn same_video_is_accepted_locally() {
    let remote = Arc::new(FakeRemote::default());
    let queue = queue_with(remote.clone(), Environment::Local);
    let movie = FileRef {
        name: "movie.mp4".into(),
        size_bytes: 200 * MIB,
        mime: Some("video/mp4".into()),
        path: PathBuf::from("/videos/movie.mp4"),
    };

    queue.submit(Submission::upload(movie)).await.unwrap();

    let requests = remote.add_requests();
    assert_eq!(requests[0].filename.as_deref(), Some("movie.mp4"));
    assert!(requests[0].content.starts_with("Video file: movie.mp4"));
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_failure_restores_entry_at_head() {
    let remote = Arc::new(FakeRemote::with_items(vec![
        backend_item("a", "a"),
        backend_item("b", "b"),
    ]));
    remote.queue_delete(Err(RemoteError::Status {
        status: 503,
        message: "unavailable".into(),
    }));
    let queue = queue_with(remote, Environment::Production);
    queue.load().await.unwrap();

    assert!(queue.remove(&EntryId::from("b")).await.is_err());

    let ids: Vec<_> = queue.entries().await.iter().map(|e| e.id().to_string()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert!(queue.last_error().await.is_some());
}

#[tokio::test]
async fn deleting_an_already_deleted_item_succeeds() {
    let remote = Arc::new(FakeRemote::with_items(vec![backend_item("a", "a")]));
    remote.queue_delete(Err(RemoteError::NotFound("Content not found".into())));
    let queue = queue_with(remote, Environment::Production);
    queue.load().await.unwrap();

    queue.remove(&EntryId::from("a")).await.unwrap();

    assert!(queue.entries().await.is_empty());
    assert!(queue.last_error().await.is_none());
}

#[tokio::test]
async fn bulk_delete_waits_for_confirmation() {
    let remote = Arc::new(FakeRemote::with_items(vec![
        backend_item("a", "a"),
        backend_item("b", "b"),
        backend_item("c", "c"),
    ]));
    let queue = queue_with(remote.clone(), Environment::Production);
    queue.load().await.unwrap();

    let request = queue.bulk_remove(vec![EntryId::from("a"), EntryId::from("b")]);
    assert_eq!(queue.entries().await.len(), 3);
    assert!(remote.deleted.lock().unwrap().is_empty());
    request.cancel();
    assert_eq!(queue.entries().await.len(), 3);

    let outcome = queue
        .bulk_remove(vec![EntryId::from("a"), EntryId::from("b")])
        .confirm()
        .await;

    assert!(matches!(outcome, BulkDeleteOutcome::Completed { deleted: 2 }));
    assert_eq!(remote.deleted.lock().unwrap().len(), 2);
    assert_eq!(queue.entries().await.len(), 1);
}

// ---------------------------------------------------------------------------
// Update & views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tags_added_through_updates_stay_unique() {
    let remote = Arc::new(FakeRemote::with_items(vec![backend_item("a", "a")]));
    let queue = queue_with(remote, Environment::Production);
    queue.load().await.unwrap();
    let id = EntryId::from("a");

    for _ in 0..2 {
        queue
            .update(
                &id,
                ItemUpdate {
                    tags: Some(["rust", "rust", "notes"].into_iter().collect()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let entry = queue.get(&id).await.unwrap();
    let tags: Vec<_> = entry.item().metadata.tags.iter().collect();
    assert_eq!(tags, vec!["rust", "notes"]);
}

#[tokio::test]
async fn mark_seen_clears_new_flag() {
    let remote = Arc::new(FakeRemote::gated());
    let queue = queue_with(remote.clone(), Environment::Production);

    let task = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.submit(Submission::paste("fresh")).await })
    };
    wait_for_len(&queue, 1).await;
    let id = queue.entries().await[0].id().clone();

    queue.mark_seen(&id).await;
    assert!(!queue.get(&id).await.unwrap().is_new());

    remote.release_adds(1);
    task.await.unwrap().unwrap();
}
