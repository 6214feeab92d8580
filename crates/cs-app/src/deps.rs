//! Dependency grouping for [`ContentQueue`](crate::ContentQueue) construction.
//!
//! Not a builder: no defaults and no hidden logic, only parameter grouping.

use std::sync::Arc;

use cs_core::intake::Environment;
use cs_core::ports::{ClockPort, PayloadReaderPort, RemoteContentPort, SettingsPort};

pub struct QueueDeps {
    pub remote: Arc<dyn RemoteContentPort>,
    pub reader: Arc<dyn PayloadReaderPort>,
    pub settings: Arc<dyn SettingsPort>,
    pub clock: Arc<dyn ClockPort>,
    pub environment: Environment,
}
