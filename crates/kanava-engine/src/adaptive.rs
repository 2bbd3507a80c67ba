#![forbid(unsafe_code)]

use std::sync::Arc;

use kanava_events::EventBus;
use kanava_platform::MediaElement;

use crate::options::TunedOptions;

/// Handle to a live adaptive-streaming session attached to a media element.
///
/// Command-only: outcomes (manifest parse, level switches, faults) are
/// published by the implementation as [`kanava_events::EngineEvent`]s on
/// the session bus it was created with.
pub trait AdaptiveSession: Send + Sync + 'static {
    /// Begin or resume loading the manifest and segments.
    fn start_load(&self);

    fn stop_load(&self);

    /// Re-attach the media pipeline in place after a decode fault, without
    /// a full reload.
    fn recover_media_error(&self);

    /// Pin a quality tier, or [`kanava_core::AUTO_LEVEL`] for automatic
    /// selection.
    fn set_current_level(&self, level: i32);

    fn current_level(&self) -> i32;

    /// Detach from the media element and release all session resources.
    fn destroy(&self);
}

/// Creates adaptive sessions for platforms without native HLS support.
pub trait AdaptiveFactory: Send + Sync + 'static {
    /// Whether adaptive playback is available at all on this platform.
    fn is_supported(&self) -> bool;

    /// Create a session attached to `element`, loading `url`.
    ///
    /// The session publishes its lifecycle on `bus`. Attaching must only
    /// happen after any previous session on the same element was destroyed;
    /// the engine guarantees that ordering.
    fn create(
        &self,
        url: &str,
        options: &TunedOptions,
        element: Arc<dyn MediaElement>,
        bus: EventBus,
    ) -> Box<dyn AdaptiveSession>;
}
