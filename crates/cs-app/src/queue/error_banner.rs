use std::sync::Arc;

use tokio::sync::RwLock;

/// The single dismissible error message shown to the user.
///
/// A new error replaces the previous one.
#[derive(Clone, Default)]
pub struct ErrorBanner {
    message: Arc<RwLock<Option<String>>>,
}

impl ErrorBanner {
    pub async fn set(&self, message: impl Into<String>) {
        *self.message.write().await = Some(message.into());
    }

    pub async fn clear(&self) {
        *self.message.write().await = None;
    }

    pub async fn current(&self) -> Option<String> {
        self.message.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn newest_error_wins() {
        let banner = ErrorBanner::default();
        banner.set("first").await;
        banner.set("second").await;
        assert_eq!(banner.current().await.as_deref(), Some("second"));
        banner.clear().await;
        assert!(banner.current().await.is_none());
    }
}
