#![forbid(unsafe_code)]

use async_trait::async_trait;

use crate::error::MediaError;

/// How much of the current position's data the element holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReadyState {
    #[default]
    Nothing,
    Metadata,
    CurrentData,
    FutureData,
    EnoughData,
}

impl ReadyState {
    /// Whether the element has at least the current frame available.
    #[must_use]
    pub fn has_current_data(self) -> bool {
        self >= Self::CurrentData
    }
}

/// The media element a playback session drives.
///
/// A single-writer resource: only one session may drive an element at a
/// time (the engine enforces the one PiP-related exception). Implementations
/// publish [`kanava_events::MediaEvent`]s to the session bus as the element
/// reports them; this trait only covers commands and synchronous state
/// reads.
#[async_trait]
pub trait MediaElement: Send + Sync + 'static {
    /// Begin or resume playback.
    ///
    /// Resolves once the platform accepts or rejects the attempt. Autoplay
    /// policy rejections map to [`MediaError::PolicyBlocked`]; a load
    /// superseded mid-attempt maps to [`MediaError::Aborted`].
    async fn play(&self) -> Result<(), MediaError>;

    fn pause(&self);

    fn set_source(&self, url: &str);

    fn clear_source(&self);

    /// Force the element to re-evaluate its (possibly empty) source.
    fn reload(&self);

    fn current_time(&self) -> f64;

    fn set_current_time(&self, secs: f64);

    /// `f64::INFINITY` for live streams, `NAN` before metadata arrives.
    fn duration(&self) -> f64;

    /// End of the seekable range when known; the live edge for live streams.
    fn seekable_end(&self) -> Option<f64>;

    fn ready_state(&self) -> ReadyState;

    fn ended(&self) -> bool;

    fn paused(&self) -> bool;

    fn volume(&self) -> f32;

    fn set_volume(&self, volume: f32);

    fn muted(&self) -> bool;

    fn set_muted(&self, muted: bool);

    /// Whether the element can play HLS without an adaptive session.
    fn supports_native_hls(&self) -> bool;

    /// Whether PiP has been disabled for this specific element.
    fn pip_disabled(&self) -> bool;
}
