use std::sync::Arc;

use kanava_platform::{MediaElement, Mutex, PipHost, PlatformError};
use tracing::{debug, warn};

use crate::error::PlayResult;

/// Picture-in-Picture session state.
///
/// `Active` is entered only on the element's enter event, never on the
/// request resolving — the user may close the floating window before the
/// request promise settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PipState {
    #[default]
    Inactive,
    Requesting,
    Active,
}

/// What to do after the element left Picture-in-Picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipLeaveAction {
    /// The host is still a watch view: keep the session and continue
    /// inline.
    ResumeInline,
    /// The host moved on: tear the session down as an unmount would.
    Teardown,
}

/// Tracks the PiP state machine for one media element.
pub struct PipManager {
    host: Arc<dyn PipHost>,
    element: Arc<dyn MediaElement>,
    state: Mutex<PipState>,
}

impl PipManager {
    #[must_use]
    pub fn new(host: Arc<dyn PipHost>, element: Arc<dyn MediaElement>) -> Self {
        Self {
            host,
            element,
            state: Mutex::new(PipState::Inactive),
        }
    }

    #[must_use]
    pub fn state(&self) -> PipState {
        *self.state.lock()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == PipState::Active
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.host.is_supported() && !self.element.pip_disabled()
    }

    /// Request PiP for the bound element.
    ///
    /// A no-op (logged) when the platform or this element does not allow
    /// PiP. An existing PiP session on another element is exited first:
    /// the platform allows at most one target.
    pub async fn request(&self) -> PlayResult<()> {
        if !self.is_available() {
            warn!("picture-in-picture not supported or disabled for this element");
            return Ok(());
        }
        if self.host.has_active_target() && !self.host.is_active_target() {
            let _ = self.host.exit().await;
        }
        *self.state.lock() = PipState::Requesting;
        match self.host.request().await {
            // Active is set by the enter event, not here.
            Ok(()) => Ok(()),
            Err(err) => {
                *self.state.lock() = PipState::Inactive;
                if matches!(&err, PlatformError::Denied) {
                    debug!("picture-in-picture request denied by policy");
                }
                Err(err.into())
            }
        }
    }

    /// Exit the active PiP session, if any.
    pub async fn exit(&self) -> PlayResult<()> {
        if self.host.has_active_target() {
            self.host.exit().await?;
        }
        Ok(())
    }

    pub async fn toggle(&self) -> PlayResult<()> {
        if self.host.is_active_target() {
            self.exit().await
        } else {
            self.request().await
        }
    }

    /// The element's enter event fired.
    pub fn on_entered(&self) {
        *self.state.lock() = PipState::Active;
    }

    /// The element's leave event fired; decide what happens next.
    pub fn on_left(&self, still_watch_view: bool) -> PipLeaveAction {
        *self.state.lock() = PipState::Inactive;
        if still_watch_view {
            PipLeaveAction::ResumeInline
        } else {
            PipLeaveAction::Teardown
        }
    }

    /// Best-effort guess whether the user restored the tab rather than
    /// closing the PiP window: a closed session usually leaves the element
    /// drained or ended. Incidental element state, not an explicit signal —
    /// treat accordingly.
    #[must_use]
    pub fn looks_like_restore(&self) -> bool {
        self.element.ready_state().has_current_data() && !self.element.ended()
    }
}
