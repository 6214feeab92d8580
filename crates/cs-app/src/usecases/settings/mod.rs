//! Branding settings use cases.

mod clear_logo;
mod get_settings;
mod update_logo;
mod update_settings;

pub use clear_logo::ClearLogo;
pub use get_settings::GetSettings;
pub use update_logo::UpdateLogo;
pub use update_settings::UpdateSettings;
