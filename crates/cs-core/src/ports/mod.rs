//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `cs-app` and the
//! adapters in `cs-infra`. The remote content service, the local file system,
//! the settings store and the clock are all reached through these traits so
//! the reconciliation logic can be tested without any of them.

mod clock;
pub mod errors;
mod payload_reader;
mod remote_content;
mod settings;

pub use clock::ClockPort;
pub use errors::RemoteError;
pub use payload_reader::PayloadReaderPort;
pub use remote_content::{AddItemRequest, RemoteContentPort};
pub use settings::SettingsPort;
