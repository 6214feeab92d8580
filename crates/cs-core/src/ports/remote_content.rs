use async_trait::async_trait;
use serde::Serialize;

use super::errors::RemoteError;
use crate::content::{ContentItem, ItemUpdate, SubmitMethod};
use crate::ids::RemoteId;

/// Body of an add-item call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItemRequest {
    pub method: SubmitMethod,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Skip the backend's duplicate check.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
}

/// The remote content service that owns the inbox.
///
/// Items returned by this port carry the backend id in `ContentItem::id`.
#[async_trait]
pub trait RemoteContentPort: Send + Sync {
    async fn list_items(&self) -> Result<Vec<ContentItem>, RemoteError>;

    async fn add_item(&self, request: &AddItemRequest) -> Result<ContentItem, RemoteError>;

    async fn update_item(&self, id: &RemoteId, update: &ItemUpdate) -> Result<(), RemoteError>;

    async fn delete_item(&self, id: &RemoteId) -> Result<(), RemoteError>;

    async fn search_items(&self, query: &str) -> Result<Vec<ContentItem>, RemoteError>;
}
