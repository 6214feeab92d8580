use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// Branding shown by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    /// Logo as a `data:` URL.
    #[serde(default)]
    pub logo_url: Option<String>,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub primary_color: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            logo_url: None,
            company_name: None,
            primary_color: None,
        }
    }
}

impl UserSettings {
    pub fn has_custom_logo(&self) -> bool {
        self.logo_url.is_some()
    }
}

/// Partial settings change; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub company_name: Option<String>,
    pub primary_color: Option<String>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut UserSettings) {
        if let Some(name) = &self.company_name {
            settings.company_name = Some(name.clone());
        }
        if let Some(color) = &self.primary_color {
            settings.primary_color = Some(color.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, UserSettings::default());
        assert!(!settings.has_custom_logo());
    }

    #[test]
    fn patch_keeps_untouched_fields() {
        let mut settings = UserSettings {
            company_name: Some("Acme".into()),
            primary_color: Some("#112233".into()),
            ..Default::default()
        };
        SettingsPatch {
            primary_color: Some("#abcdef".into()),
            ..Default::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.company_name.as_deref(), Some("Acme"));
        assert_eq!(settings.primary_color.as_deref(), Some("#abcdef"));
    }
}
