use std::time::Duration;

use kanava_core::{QualityLevel, AUTO_LEVEL};

/// Controls are hidden after this long without pointer or touch activity
/// while media is playing.
pub const CONTROLS_HIDE_AFTER: Duration = Duration::from_secs(5);

/// Visibility window of the unlock affordance while locked.
pub const UNLOCK_HIDE_AFTER: Duration = Duration::from_secs(5);

/// Relative seek step used by on-screen and OS seek controls.
pub const DEFAULT_SEEK_STEP_SECS: f64 = 30.0;

/// How the video is fitted into the player surface. Presentation only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    #[default]
    Contain,
    Cover,
    Fill,
}

/// Horizontal swipe over the player surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Forward motion: next channel.
    Left,
    /// Backward motion: previous channel.
    Right,
}

/// User-facing playback state, derived entirely from engine and host
/// events. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackUiState {
    pub is_playing: bool,
    /// In `[0, 1]`.
    pub volume: f32,
    pub is_muted: bool,
    pub progress_secs: f64,
    /// `f64::INFINITY` for live streams.
    pub duration_secs: f64,
    pub is_live: bool,
    /// Display list: deduplicated by height, descending.
    pub quality_levels: Vec<QualityLevel>,
    /// [`AUTO_LEVEL`] means automatic selection.
    pub current_quality: i32,
    pub fit_mode: FitMode,
    pub is_fullscreen: bool,
    pub is_locked: bool,
    pub is_pip: bool,
    pub show_controls: bool,
    pub show_unlock: bool,
    /// Autoplay was rejected by policy; a tap will start playback.
    pub playback_blocked: bool,
    pub player_error: Option<String>,
}

impl Default for PlaybackUiState {
    fn default() -> Self {
        Self {
            is_playing: false,
            volume: 1.0,
            is_muted: false,
            progress_secs: 0.0,
            duration_secs: 0.0,
            is_live: false,
            quality_levels: Vec::new(),
            current_quality: AUTO_LEVEL,
            fit_mode: FitMode::Contain,
            is_fullscreen: false,
            is_locked: false,
            is_pip: false,
            show_controls: true,
            show_unlock: false,
            playback_blocked: false,
            player_error: None,
        }
    }
}
