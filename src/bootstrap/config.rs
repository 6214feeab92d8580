//! # Configuration loader
//!
//! `load_config` is pure data loading: whatever the TOML file says becomes the
//! [`AppConfig`], no validation. `resolve_config` layers environment variables
//! and system paths on top of it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cs_core::config::AppConfig;

pub const ENV_API_URL: &str = "CONTENT_STACK_API_URL";
pub const ENV_ENVIRONMENT: &str = "CONTENT_STACK_ENV";

const APP_DIR_NAME: &str = "content-stack";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Builds the effective configuration.
///
/// 1. the explicit file, else `<config dir>/content-stack/config.toml` when it exists;
/// 2. `CONTENT_STACK_API_URL` / `CONTENT_STACK_ENV` override file values;
/// 3. empty paths fall back to the platform data directory.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => load_config(&path)?,
            None => AppConfig::empty(),
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    fill_missing_paths(&mut config, &default_data_dir());
    Ok(config)
}

pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url;
    }
    if let Some(env) = lookup(ENV_ENVIRONMENT).filter(|v| !v.trim().is_empty()) {
        config.environment = env;
    }
}

pub fn fill_missing_paths(config: &mut AppConfig, data_dir: &Path) {
    let defaults = AppConfig::with_system_defaults(data_dir.to_path_buf());
    if config.settings_path.as_os_str().is_empty() {
        config.settings_path = defaults.settings_path;
    }
    if config.log_dir.as_os_str().is_empty() {
        config.log_dir = defaults.log_dir;
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
