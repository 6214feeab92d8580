use std::sync::Arc;

use anyhow::Result;
use cs_core::ports::SettingsPort;
use cs_core::settings::{SettingsPatch, UserSettings, CURRENT_SCHEMA_VERSION};
use tracing::{info, info_span, Instrument};

/// Applies a [`SettingsPatch`] and persists the result.
///
/// Loads the current settings first so untouched fields survive, and logs the
/// fields that actually changed.
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, patch: SettingsPatch) -> Result<UserSettings> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            let old = self.settings.load().await?;
            if old.schema_version != CURRENT_SCHEMA_VERSION {
                return Err(anyhow::anyhow!(
                    "Invalid schema version: expected {}, got {}",
                    CURRENT_SCHEMA_VERSION,
                    old.schema_version
                ));
            }

            let mut new = old.clone();
            patch.apply(&mut new);

            let changes = changed_fields(&old, &new);
            if changes.is_empty() {
                info!("settings unchanged, skipping save");
                return Ok(new);
            }

            self.settings.save(&new).await?;
            info!(changed_fields = %changes.join(", "), "settings updated");
            Ok(new)
        }
        .instrument(span)
        .await
    }
}

pub(crate) fn changed_fields(old: &UserSettings, new: &UserSettings) -> Vec<String> {
    let mut parts = Vec::new();
    if old.company_name != new.company_name {
        parts.push(format!(
            "company_name: {:?} → {:?}",
            old.company_name, new.company_name
        ));
    }
    if old.primary_color != new.primary_color {
        parts.push(format!(
            "primary_color: {:?} → {:?}",
            old.primary_color, new.primary_color
        ));
    }
    if old.logo_url != new.logo_url {
        // Logo payloads are large data URLs.
        parts.push(format!(
            "logo: {} → {}",
            old.has_custom_logo(),
            new.has_custom_logo()
        ));
    }
    parts
}
