//! Wire types of the inbox service and their mapping to the domain model.

use chrono::{DateTime, Utc};
use cs_core::content::{
    ContentItem, ContentKind, ContentMetadata, ContentSource, ContentStatus, ItemUpdate, Tags,
};
use cs_core::ids::EntryId;
use serde::{Deserialize, Serialize};

/// Every response is wrapped in this envelope.
///
/// `success: false` on a 2xx reply is an error for writes and an empty result
/// for the list and search endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    pub item: Option<BackendItem>,
    pub items: Option<Vec<BackendItem>>,
    pub results: Option<Vec<BackendItem>>,
    pub existing_id: Option<String>,
}

impl Envelope {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
    pub source: BackendSource,
    pub content: BackendContent,
    #[serde(default)]
    pub llm_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendSource {
    #[serde(default)]
    pub method: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_text: String,
    pub word_count: Option<usize>,
    #[serde(default)]
    pub hash: String,
}

fn kind_from_backend(kind: &str) -> ContentKind {
    match kind {
        "image" => ContentKind::Image,
        "document" | "video" | "audio" | "data" | "design" | "archive" | "email" => ContentKind::File,
        // text, note, web, code and anything unknown
        _ => ContentKind::Text,
    }
}

fn source_from_backend(method: &str) -> ContentSource {
    match method {
        "upload" => ContentSource::FileUpload,
        "drop" => ContentSource::Drop,
        "url" => ContentSource::Article,
        _ => ContentSource::Paste,
    }
}

fn status_from_backend(status: &str) -> ContentStatus {
    match status {
        "processing" => ContentStatus::Processing,
        "stored" => ContentStatus::Processed,
        "enriched" => ContentStatus::Enriched,
        _ => ContentStatus::Raw,
    }
}

pub(crate) fn status_to_backend(status: ContentStatus) -> &'static str {
    match status {
        ContentStatus::Raw => "inbox",
        ContentStatus::Processing => "processing",
        ContentStatus::Processed => "stored",
        ContentStatus::Enriched => "enriched",
    }
}

impl From<BackendItem> for ContentItem {
    fn from(item: BackendItem) -> Self {
        let category = item
            .llm_analysis
            .as_ref()
            .and_then(|analysis| analysis.get("category"))
            .and_then(|c| c.as_str())
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let title = (!item.content.title.is_empty()).then(|| item.content.title.clone());

        ContentItem {
            id: EntryId::from(item.id),
            kind: kind_from_backend(&item.content.kind),
            source: source_from_backend(&item.source.method),
            status: status_from_backend(&item.status),
            title: item.content.title,
            content: Some(item.content.full_text.clone()),
            timestamp: item.created_at,
            metadata: ContentMetadata {
                title,
                tags: item.tags.into_iter().collect(),
                category,
                size_bytes: item.content.full_text.len() as u64,
                content_hash: item.content.hash,
                word_count: item.content.word_count,
                url: item.source.url,
                file_type: (!item.content.kind.is_empty()).then_some(item.content.kind),
                created_at: item.created_at,
                updated_at: item.updated_at.unwrap_or(item.created_at),
            },
        }
    }
}

/// Body of `PUT /item/:id`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    metadata: UpdateMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct UpdateMetadata<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

impl<'a> From<&'a ItemUpdate> for UpdateBody<'a> {
    fn from(update: &'a ItemUpdate) -> Self {
        Self {
            title: update.title.as_deref(),
            content: update.content.as_deref(),
            status: update.status.map(status_to_backend),
            metadata: UpdateMetadata {
                title: update.title.as_deref(),
                tags: update.tags.as_ref(),
                category: update.category.as_deref(),
                url: update.url.as_deref(),
            },
        }
    }
}
