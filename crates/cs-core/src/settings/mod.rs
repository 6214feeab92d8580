pub mod model;

pub use model::{SettingsPatch, UserSettings, CURRENT_SCHEMA_VERSION};
