use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use cs_core::ports::SettingsPort;
use cs_core::settings::{UserSettings, CURRENT_SCHEMA_VERSION};
use tokio::fs;
use tracing::{debug, info};

/// Branding settings stored as pretty-printed JSON.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create settings dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Writes to a sibling temp file, then renames it over the target.
    ///
    /// Readers see either the previous contents or the complete new ones.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp settings failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp settings to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl SettingsPort for FileSettingsRepository {
    /// Missing file means defaults. Files from an older schema are upgraded and
    /// written back.
    async fn load(&self) -> Result<UserSettings> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(UserSettings::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        let mut settings: UserSettings = serde_json::from_str(&content)
            .with_context(|| format!("parse settings failed: {}", self.path.display()))?;

        if settings.schema_version < CURRENT_SCHEMA_VERSION {
            info!(
                from = settings.schema_version,
                to = CURRENT_SCHEMA_VERSION,
                "upgrading settings schema"
            );
            settings.schema_version = CURRENT_SCHEMA_VERSION;
            self.save(&settings).await?;
        }

        Ok(settings)
    }

    async fn save(&self, settings: &UserSettings) -> Result<()> {
        let content =
            serde_json::to_string_pretty(settings).context("serialize settings failed")?;

        self.atomic_write(&content).await
    }
}
