use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tags;
use crate::ids::EntryId;

/// Hash shown until the backend has computed the real one.
pub const PENDING_HASH: &str = "pending...";

/// Maximum number of characters of text used as a derived title.
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Url,
    File,
    Image,
}

/// How the content entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentSource {
    Paste,
    FileUpload,
    Article,
    Drop,
}

/// Lifecycle stage. The backend value is authoritative once confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Raw,
    Processing,
    Processed,
    Enriched,
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "processing" => Ok(Self::Processing),
            "processed" => Ok(Self::Processed),
            "enriched" => Ok(Self::Enriched),
            other => Err(format!("unknown content status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Tags,
    pub category: Option<String>,
    pub size_bytes: u64,
    pub content_hash: String,
    pub word_count: Option<usize>,
    pub url: Option<String>,
    pub file_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentMetadata {
    /// Metadata for an item the backend has not seen yet.
    pub fn pending(size_bytes: u64, at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            tags: Tags::new(),
            category: None,
            size_bytes,
            content_hash: PENDING_HASH.to_string(),
            word_count: None,
            url: None,
            file_type: None,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn is_hash_pending(&self) -> bool {
        self.content_hash == PENDING_HASH
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: EntryId,
    pub kind: ContentKind,
    pub source: ContentSource,
    pub status: ContentStatus,
    pub title: String,
    pub content: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub metadata: ContentMetadata,
}

impl ContentItem {
    /// Folds the backend's authoritative copy into this provisional item.
    ///
    /// The local id survives; every field the backend reports wins, fields it
    /// leaves empty keep their provisional value.
    pub fn merge_confirmed(self, remote: ContentItem) -> ContentItem {
        let local = self;
        let remote_meta = remote.metadata;
        let local_meta = local.metadata;

        let metadata = ContentMetadata {
            title: remote_meta.title.or(local_meta.title),
            tags: if remote_meta.tags.is_empty() {
                local_meta.tags
            } else {
                remote_meta.tags
            },
            category: remote_meta.category.or(local_meta.category),
            size_bytes: remote_meta.size_bytes,
            content_hash: remote_meta.content_hash,
            word_count: remote_meta.word_count.or(local_meta.word_count),
            url: remote_meta.url.or(local_meta.url),
            file_type: remote_meta.file_type.or(local_meta.file_type),
            created_at: remote_meta.created_at,
            updated_at: remote_meta.updated_at,
        };

        ContentItem {
            id: local.id,
            kind: remote.kind,
            source: remote.source,
            status: remote.status,
            title: if remote.title.trim().is_empty() {
                local.title
            } else {
                remote.title
            },
            content: remote.content.or(local.content),
            timestamp: local.timestamp,
            metadata,
        }
    }
}

/// Title derived from the leading characters of `text`.
pub fn derive_title(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn provisional() -> ContentItem {
        let mut metadata = ContentMetadata::pending(11, at(100));
        metadata.tags.insert("draft");
        ContentItem {
            id: EntryId::from("content-local"),
            kind: ContentKind::Text,
            source: ContentSource::Paste,
            status: ContentStatus::Raw,
            title: "hello world".into(),
            content: Some("hello world".into()),
            timestamp: at(100),
            metadata,
        }
    }

    fn remote() -> ContentItem {
        let mut metadata = ContentMetadata::pending(11, at(200));
        metadata.content_hash = "abc123".into();
        metadata.word_count = Some(2);
        ContentItem {
            id: EntryId::from("server-1"),
            kind: ContentKind::Text,
            source: ContentSource::Paste,
            status: ContentStatus::Processing,
            title: String::new(),
            content: None,
            timestamp: at(200),
            metadata,
        }
    }

    #[test]
    fn merge_keeps_local_identity_and_timestamp() {
        let merged = provisional().merge_confirmed(remote());
        assert_eq!(merged.id.as_str(), "content-local");
        assert_eq!(merged.timestamp, at(100));
    }

    #[test]
    fn merge_prefers_backend_fields_and_falls_back_when_missing() {
        let merged = provisional().merge_confirmed(remote());
        assert_eq!(merged.status, ContentStatus::Processing);
        assert_eq!(merged.metadata.content_hash, "abc123");
        assert_eq!(merged.metadata.word_count, Some(2));
        assert_eq!(merged.title, "hello world");
        assert_eq!(merged.content.as_deref(), Some("hello world"));
        assert!(merged.metadata.tags.contains("draft"));
    }

    #[test]
    fn derive_title_truncates_long_text() {
        let long = "x".repeat(60);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
        assert!(title.ends_with("..."));
        assert_eq!(derive_title("short"), "short");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Enriched".parse::<ContentStatus>(), Ok(ContentStatus::Enriched));
        assert!("archived".parse::<ContentStatus>().is_err());
    }

    #[test]
    fn source_serializes_in_kebab_case() {
        let json = serde_json::to_string(&ContentSource::FileUpload).unwrap();
        assert_eq!(json, "\"file-upload\"");
    }
}
