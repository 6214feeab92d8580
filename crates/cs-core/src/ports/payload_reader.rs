use std::path::Path;

use async_trait::async_trait;

use crate::content::FileRef;

/// Reads local file payloads on demand.
#[async_trait]
pub trait PayloadReaderPort: Send + Sync {
    async fn read_text(&self, file: &FileRef) -> anyhow::Result<String>;

    async fn read_bytes(&self, path: &Path) -> anyhow::Result<Vec<u8>>;
}
