use std::sync::Arc;

use kanava_platform::{MediaElement, PlatformError, WakeLock};
use tracing::{debug, warn};

/// Keeps the screen awake while media is actively playing.
///
/// The platform silently drops wake locks when the tab hides, so the lock
/// is re-acquired whenever the tab becomes visible with media still
/// playing. Permission and visibility failures are expected and swallowed.
pub struct KeepAlive {
    lock: Arc<dyn WakeLock>,
    element: Arc<dyn MediaElement>,
}

impl KeepAlive {
    #[must_use]
    pub fn new(lock: Arc<dyn WakeLock>, element: Arc<dyn MediaElement>) -> Self {
        Self { lock, element }
    }

    pub async fn on_playing(&self) {
        self.acquire().await;
    }

    pub async fn on_paused(&self) {
        self.lock.release().await;
    }

    pub async fn on_visibility(&self, visible: bool) {
        if visible && !self.element.paused() {
            self.acquire().await;
        }
    }

    /// Always attempted on teardown, regardless of acquisition success.
    pub async fn teardown(&self) {
        self.lock.release().await;
    }

    async fn acquire(&self) {
        if !self.lock.is_supported() {
            return;
        }
        match self.lock.acquire().await {
            Ok(()) => {}
            Err(PlatformError::Denied | PlatformError::Unsupported) => {
                debug!("wake lock unavailable");
            }
            Err(err) => warn!(error = %err, "wake lock acquisition failed"),
        }
    }
}
