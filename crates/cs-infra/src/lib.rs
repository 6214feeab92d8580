//! Infrastructure adapters for the Content Stack ports.

pub mod fs;
pub mod http;
pub mod settings;
pub mod time;

pub use fs::TokioPayloadReader;
pub use http::{HttpContentService, HttpServiceConfig};
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
