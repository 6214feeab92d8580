use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{derive_title, ContentKind, ContentSource};

/// How the user handed the content over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMethod {
    Paste,
    Upload,
    Url,
    Drop,
}

impl SubmitMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paste => "paste",
            Self::Upload => "upload",
            Self::Url => "url",
            Self::Drop => "drop",
        }
    }
}

/// Reference to a file on disk. The bytes are only read when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
    pub mime: Option<String>,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    Text(String),
    File(FileRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub method: SubmitMethod,
    pub payload: Payload,
}

impl Submission {
    pub fn paste(content: impl Into<String>) -> Self {
        Self {
            method: SubmitMethod::Paste,
            payload: Payload::Text(content.into()),
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            method: SubmitMethod::Url,
            payload: Payload::Text(url.into()),
        }
    }

    pub fn upload(file: FileRef) -> Self {
        Self {
            method: SubmitMethod::Upload,
            payload: Payload::File(file),
        }
    }

    pub fn drop_file(file: FileRef) -> Self {
        Self {
            method: SubmitMethod::Drop,
            payload: Payload::File(file),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match (&self.method, &self.payload) {
            (SubmitMethod::Url, _) => ContentKind::Url,
            (_, Payload::File(file)) => {
                if file.mime.as_deref().is_some_and(|m| m.starts_with("image/")) {
                    ContentKind::Image
                } else {
                    ContentKind::File
                }
            }
            (_, Payload::Text(_)) => ContentKind::Text,
        }
    }

    pub fn source(&self) -> ContentSource {
        match self.method {
            SubmitMethod::Paste => ContentSource::Paste,
            SubmitMethod::Upload => ContentSource::FileUpload,
            SubmitMethod::Url => ContentSource::Article,
            SubmitMethod::Drop => ContentSource::Drop,
        }
    }

    /// Title shown while the backend is still working.
    pub fn provisional_title(&self) -> String {
        match &self.payload {
            Payload::File(file) => file.name.clone(),
            Payload::Text(text) => derive_title(text),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        match &self.payload {
            Payload::File(file) => file.size_bytes,
            Payload::Text(text) => text.len() as u64,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            Payload::File(_) => None,
        }
    }

    pub fn file(&self) -> Option<&FileRef> {
        match &self.payload {
            Payload::File(file) => Some(file),
            Payload::Text(_) => None,
        }
    }
}
