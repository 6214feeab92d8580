//! Shared queue state handed to every use case.

mod error_banner;
mod events;
mod store;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use error_banner::ErrorBanner;
pub use events::{QueueEvent, QueueEvents};
pub use store::QueueStore;

#[derive(Clone, Default)]
pub struct QueueState {
    pub store: QueueStore,
    pub events: QueueEvents,
    pub banner: ErrorBanner,
    in_flight: Arc<AtomicUsize>,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one submission is waiting for the backend.
    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub(crate) fn begin_submission(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            counter: Arc::clone(&self.in_flight),
        }
    }
}

pub(crate) struct InFlightGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
