use async_trait::async_trait;

use crate::settings::UserSettings;

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<UserSettings>;
    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()>;
}
