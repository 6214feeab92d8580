use std::sync::Arc;

use cs_core::content::ContentItem;
use cs_core::ports::RemoteContentPort;

use crate::error::QueueError;

/// Full-text search on the remote service. Leaves the local queue alone.
#[derive(Clone)]
pub struct SearchContent {
    remote: Arc<dyn RemoteContentPort>,
}

impl SearchContent {
    pub fn new(remote: Arc<dyn RemoteContentPort>) -> Self {
        Self { remote }
    }

    #[tracing::instrument(name = "usecase.search_content.execute", skip(self))]
    pub async fn execute(&self, query: &str) -> Result<Vec<ContentItem>, QueueError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.remote.search_items(query).await?)
    }
}
