//! # Dependency wiring
//!
//! The only place where concrete adapters are chosen. Everything above this
//! module sees ports.

use std::sync::Arc;
use std::time::Duration;

use cs_app::{ContentQueue, QueueDeps};
use cs_core::config::AppConfig;
use cs_core::intake::Environment;
use cs_infra::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use cs_infra::{
    FileSettingsRepository, HttpContentService, HttpServiceConfig, SystemClock, TokioPayloadReader,
};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("remote content service initialization failed: {0}")]
    RemoteInit(String),

    #[error("settings storage initialization failed: {0}")]
    SettingsInit(String),
}

pub type WiringResult<T> = Result<T, WiringError>;

/// Resolves config facts into adapter settings and builds [`QueueDeps`].
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<QueueDeps> {
    let base_url = if config.api_base_url.trim().is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        config.api_base_url.trim().to_string()
    };
    let timeout = match config.request_timeout_secs {
        0 => DEFAULT_TIMEOUT,
        secs => Duration::from_secs(secs),
    };

    let remote = HttpContentService::new(HttpServiceConfig { base_url, timeout })
        .map_err(|e| WiringError::RemoteInit(format!("{e:#}")))?;

    if config.settings_path.as_os_str().is_empty() {
        return Err(WiringError::SettingsInit("no settings path configured".into()));
    }
    let settings = FileSettingsRepository::new(config.settings_path.clone());

    let environment = resolve_environment(&config.environment);

    info!(
        api = %remote.base_url(),
        timeout_secs = timeout.as_secs(),
        environment = ?environment,
        settings = %settings.path().display(),
        "dependencies wired"
    );

    Ok(QueueDeps {
        remote: Arc::new(remote),
        reader: Arc::new(TokioPayloadReader),
        settings: Arc::new(settings),
        clock: Arc::new(SystemClock),
        environment,
    })
}

/// Builds the queue facade from config in one step.
pub fn build_queue(config: &AppConfig) -> WiringResult<ContentQueue> {
    Ok(ContentQueue::new(wire_dependencies(config)?))
}

fn resolve_environment(raw: &str) -> Environment {
    if raw.trim().is_empty() {
        return Environment::default();
    }
    raw.parse().unwrap_or_else(|err: String| {
        warn!(error = %err, "falling back to production upload limits");
        Environment::Production
    })
}
