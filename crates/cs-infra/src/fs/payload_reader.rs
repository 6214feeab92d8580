use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use cs_core::content::FileRef;
use cs_core::intake::TEXT_READ_LIMIT;
use cs_core::ports::PayloadReaderPort;
use tokio::fs;

/// Reads submitted files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPayloadReader;

#[async_trait]
impl PayloadReaderPort for TokioPayloadReader {
    async fn read_text(&self, file: &FileRef) -> Result<String> {
        let meta = fs::metadata(&file.path)
            .await
            .with_context(|| format!("stat failed: {}", file.path.display()))?;
        if meta.len() > TEXT_READ_LIMIT {
            bail!(
                "{} is too large to read as text ({} bytes)",
                file.name,
                meta.len()
            );
        }

        let bytes = fs::read(&file.path)
            .await
            .with_context(|| format!("read failed: {}", file.path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .with_context(|| format!("read failed: {}", path.display()))
    }
}
