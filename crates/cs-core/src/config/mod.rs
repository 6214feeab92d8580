//! # Configuration DTO
//!
//! Data only: TOML is mapped onto [`AppConfig`] without validation. Empty
//! strings and zero values are facts; deciding what to do with them belongs to
//! the bootstrap code.

use std::path::PathBuf;

/// Application configuration DTO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the remote content service, e.g. `http://localhost:3457`.
    pub api_base_url: String,

    /// Per-request timeout in seconds (0 when unset).
    pub request_timeout_secs: u64,

    /// Raw environment name (`local`, `production`, ...).
    pub environment: String,

    /// Where user settings are persisted.
    pub settings_path: PathBuf,

    /// Directory for log files; empty disables file logging.
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section_str = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            api_base_url: section_str("api", "base_url"),
            request_timeout_secs: toml_value
                .get("api")
                .and_then(|a| a.get("timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            environment: section_str("intake", "environment"),
            settings_path: PathBuf::from(section_str("storage", "settings_path")),
            log_dir: PathBuf::from(section_str("logging", "log_dir")),
        })
    }

    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: 0,
            environment: String::new(),
            settings_path: PathBuf::new(),
            log_dir: PathBuf::new(),
        }
    }

    /// Builds paths under `data_dir`; everything else stays empty.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join("settings.json"),
            log_dir: data_dir.join("logs"),
            ..Self::empty()
        }
    }
}
