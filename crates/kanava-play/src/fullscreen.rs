use std::sync::Arc;

use kanava_platform::{FullscreenSurface, OrientationLock};
use tracing::debug;

use crate::ui::UiController;

/// Fullscreen and orientation handling for the player surface.
///
/// Orientation locking is best-effort everywhere: rejections are swallowed
/// because several platforms refuse to lock outside fullscreen or at all.
pub struct FullscreenController {
    surface: Arc<dyn FullscreenSurface>,
    orientation: Arc<dyn OrientationLock>,
    ui: Arc<UiController>,
}

impl FullscreenController {
    #[must_use]
    pub fn new(
        surface: Arc<dyn FullscreenSurface>,
        orientation: Arc<dyn OrientationLock>,
        ui: Arc<UiController>,
    ) -> Self {
        Self {
            surface,
            orientation,
            ui,
        }
    }

    /// Enter fullscreen (with a landscape lock attempt) or leave it.
    pub async fn toggle(&self) {
        if !self.surface.is_supported() {
            debug!("fullscreen not supported; ignoring toggle");
            return;
        }
        if self.surface.is_fullscreen() {
            if let Err(err) = self.surface.exit_fullscreen().await {
                debug!(error = %err, "fullscreen exit rejected");
            }
            self.orientation.unlock();
        } else {
            if let Err(err) = self.surface.request_fullscreen().await {
                debug!(error = %err, "fullscreen request rejected");
            }
            if self.orientation.is_supported() {
                if let Err(err) = self.orientation.lock_landscape().await {
                    debug!(error = %err, "orientation lock rejected");
                }
            }
        }
        self.ui.user_activity();
    }

    /// React to a document-level fullscreen change, whatever caused it.
    ///
    /// Leaving fullscreen always force-clears the control lock and the
    /// orientation lock — a system back gesture must not strand the player
    /// locked.
    pub fn on_fullscreen_changed(&self, fullscreen: bool) {
        if !fullscreen {
            self.ui.force_unlock();
            self.orientation.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use kanava_test_utils::{FakeFullscreenSurface, FakeMediaElement, FakeOrientationLock};

    use super::*;

    fn controller() -> (
        FullscreenController,
        Arc<FakeFullscreenSurface>,
        Arc<FakeOrientationLock>,
        Arc<UiController>,
    ) {
        let surface = Arc::new(FakeFullscreenSurface::new());
        let orientation = Arc::new(FakeOrientationLock::new());
        let ui = UiController::new(Arc::new(FakeMediaElement::new()) as _);
        let ctl = FullscreenController::new(
            Arc::clone(&surface) as _,
            Arc::clone(&orientation) as _,
            Arc::clone(&ui),
        );
        (ctl, surface, orientation, ui)
    }

    #[tokio::test]
    async fn toggle_enters_fullscreen_with_a_landscape_lock() {
        let (ctl, surface, orientation, _ui) = controller();
        ctl.toggle().await;
        assert!(surface.is_fullscreen());
        assert!(orientation.is_locked());

        ctl.toggle().await;
        assert!(!surface.is_fullscreen());
        assert!(!orientation.is_locked());
    }

    #[tokio::test]
    async fn unsupported_orientation_lock_is_skipped() {
        let (ctl, surface, orientation, _ui) = controller();
        orientation.set_supported(false);
        ctl.toggle().await;
        assert!(surface.is_fullscreen());
        assert!(!orientation.is_locked());
    }

    #[tokio::test]
    async fn external_exit_unlocks_orientation_and_controls() {
        let (ctl, _surface, orientation, ui) = controller();
        ctl.toggle().await;
        ui.toggle_lock();
        assert!(ui.snapshot().is_locked);

        ctl.on_fullscreen_changed(false);
        assert!(!orientation.is_locked());
        assert!(!ui.snapshot().is_locked);
    }
}
