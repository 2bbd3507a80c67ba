#![forbid(unsafe_code)]

use kanava_events::MediaActionKind;
use kanava_platform::{MediaSessionSurface, Mutex, NowPlaying, PlaybackState};

/// Media-session surface recording the last published state.
#[derive(Default)]
pub struct RecordingMediaSession {
    metadata: Mutex<Option<NowPlaying>>,
    state: Mutex<PlaybackState>,
    actions: Mutex<Vec<MediaActionKind>>,
}

impl RecordingMediaSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn metadata(&self) -> Option<NowPlaying> {
        self.metadata.lock().clone()
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        *self.state.lock()
    }

    #[must_use]
    pub fn enabled_actions(&self) -> Vec<MediaActionKind> {
        self.actions.lock().clone()
    }
}

impl MediaSessionSurface for RecordingMediaSession {
    fn is_supported(&self) -> bool {
        true
    }

    fn set_metadata(&self, metadata: Option<NowPlaying>) {
        *self.metadata.lock() = metadata;
    }

    fn set_playback_state(&self, state: PlaybackState) {
        *self.state.lock() = state;
    }

    fn set_enabled_actions(&self, actions: Vec<MediaActionKind>) {
        *self.actions.lock() = actions;
    }
}
