//! Mocks and fixtures shared by the use case unit tests.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use cs_core::content::{
    ContentItem, ContentKind, ContentMetadata, ContentSource, ContentStatus, FileRef, ItemUpdate,
};
use cs_core::ids::{EntryId, RemoteId};
use cs_core::ports::{AddItemRequest, ClockPort, PayloadReaderPort, RemoteContentPort, RemoteError};
use mockall::mock;

mock! {
    pub Remote {}

    #[async_trait]
    impl RemoteContentPort for Remote {
        async fn list_items(&self) -> Result<Vec<ContentItem>, RemoteError>;
        async fn add_item(&self, request: &AddItemRequest) -> Result<ContentItem, RemoteError>;
        async fn update_item(&self, id: &RemoteId, update: &ItemUpdate) -> Result<(), RemoteError>;
        async fn delete_item(&self, id: &RemoteId) -> Result<(), RemoteError>;
        async fn search_items(&self, query: &str) -> Result<Vec<ContentItem>, RemoteError>;
    }
}

mock! {
    pub Reader {}

    #[async_trait]
    impl PayloadReaderPort for Reader {
        async fn read_text(&self, file: &FileRef) -> anyhow::Result<String>;
        async fn read_bytes(&self, path: &Path) -> anyhow::Result<Vec<u8>>;
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

pub fn remote_item(id: &str, title: &str) -> ContentItem {
    let at = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
    let mut metadata = ContentMetadata::pending(title.len() as u64, at);
    metadata.content_hash = format!("hash-{id}");
    ContentItem {
        id: EntryId::from(id),
        kind: ContentKind::Text,
        source: ContentSource::Paste,
        status: ContentStatus::Raw,
        title: title.into(),
        content: Some(title.into()),
        timestamp: at,
        metadata,
    }
}

pub fn server_error() -> RemoteError {
    RemoteError::Status {
        status: 500,
        message: "Internal Server Error".into(),
    }
}
