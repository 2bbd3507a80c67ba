#![forbid(unsafe_code)]

use kanava_events::MediaActionKind;
#[cfg(any(test, feature = "test-utils"))]
use unimock::unimock;

/// One artwork rendition offered to the OS now-playing surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artwork {
    pub src: String,
    /// `"96x96"`-style size descriptor.
    pub sizes: String,
}

/// Now-playing metadata published to the OS.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub artwork: Vec<Artwork>,
}

/// OS-visible playback state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    #[default]
    None,
    Playing,
    Paused,
}

/// The OS media-session surface.
///
/// Write-only from the core's perspective: incoming control presses arrive
/// as [`kanava_events::HostEvent::MediaAction`] on the session bus, which
/// the implementation publishes for exactly the actions enabled here.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock(api = MediaSessionSurfaceMock)
)]
pub trait MediaSessionSurface: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    /// Publish metadata, or clear it with `None`.
    fn set_metadata(&self, metadata: Option<NowPlaying>);

    fn set_playback_state(&self, state: PlaybackState);

    /// Declare which OS controls are live. Actions absent from the list
    /// must be unregistered so stale handlers never outlive a session.
    fn set_enabled_actions(&self, actions: Vec<MediaActionKind>);
}
