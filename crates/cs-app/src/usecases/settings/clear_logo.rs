use std::sync::Arc;

use anyhow::Result;
use cs_core::ports::SettingsPort;
use tracing::{info, info_span, Instrument};

/// Removes the custom logo, restoring the default one.
pub struct ClearLogo {
    settings: Arc<dyn SettingsPort>,
}

impl ClearLogo {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<()> {
        let span = info_span!("usecase.clear_logo.execute");

        async {
            let mut settings = self.settings.load().await?;
            if settings.logo_url.take().is_none() {
                return Ok(());
            }
            self.settings.save(&settings).await?;
            info!("custom logo cleared");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
