use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cs_core::intake::mime_for_name;
use cs_core::ports::{PayloadReaderPort, SettingsPort};
use tracing::{info, info_span, Instrument};

const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

fn image_mime(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_str()?;
    mime_for_name(name).filter(|mime| mime.starts_with("image/"))
}

/// Stores an image file as the custom logo, encoded as a `data:` URL.
pub struct UpdateLogo {
    settings: Arc<dyn SettingsPort>,
    reader: Arc<dyn PayloadReaderPort>,
}

impl UpdateLogo {
    pub fn new(settings: Arc<dyn SettingsPort>, reader: Arc<dyn PayloadReaderPort>) -> Self {
        Self { settings, reader }
    }

    pub async fn execute(&self, path: &Path) -> Result<String> {
        let span = info_span!("usecase.update_logo.execute", path = %path.display());

        async {
            let Some(mime) = image_mime(path) else {
                bail!("unsupported logo format: {}", path.display());
            };

            let bytes = self
                .reader
                .read_bytes(path)
                .await
                .with_context(|| format!("failed to read logo {}", path.display()))?;
            if bytes.len() > MAX_LOGO_BYTES {
                bail!(
                    "logo is too large ({} bytes, limit {} bytes)",
                    bytes.len(),
                    MAX_LOGO_BYTES
                );
            }

            let data_url = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
            let mut settings = self.settings.load().await?;
            settings.logo_url = Some(data_url.clone());
            self.settings.save(&settings).await?;

            info!(mime, size = bytes.len(), "custom logo stored");
            Ok(data_url)
        }
        .instrument(span)
        .await
    }
}
