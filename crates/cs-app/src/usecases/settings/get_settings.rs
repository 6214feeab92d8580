use std::sync::Arc;

use anyhow::Result;
use cs_core::ports::SettingsPort;
use cs_core::settings::UserSettings;
use tracing::{debug, info_span, Instrument};

/// Loads the stored branding settings.
pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<UserSettings> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let settings = self.settings.load().await?;
            debug!(custom_logo = settings.has_custom_logo(), "settings loaded");
            Ok(settings)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::settings::fake::FakeSettingsPort;

    #[tokio::test]
    async fn returns_stored_settings() {
        let stored = UserSettings {
            company_name: Some("Acme".into()),
            ..Default::default()
        };
        let repo = Arc::new(FakeSettingsPort::new(stored.clone()));

        let loaded = GetSettings::new(repo.clone()).execute().await.unwrap();

        assert_eq!(loaded, stored);
        assert_eq!(repo.load_count(), 1);
    }
}
