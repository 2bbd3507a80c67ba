use std::sync::Arc;

use kanava_core::{dedup_by_height, AUTO_LEVEL};
use kanava_events::{EngineEvent, Event, HostEvent, MediaEvent};
use kanava_platform::{MediaElement, Mutex, ScheduledTask};
use tracing::debug;

use crate::types::{FitMode, PlaybackUiState, CONTROLS_HIDE_AFTER, UNLOCK_HIDE_AFTER};

/// Derives [`PlaybackUiState`] from bus events and owns the control
/// visibility timers.
///
/// Every user interaction routes through here so the auto-hide timer is
/// reset consistently. Progress, duration, and liveness are only ever
/// taken from engine/element events, never computed independently.
pub struct UiController {
    element: Arc<dyn MediaElement>,
    state: Arc<Mutex<PlaybackUiState>>,
    manifest_live: Mutex<bool>,
    prev_volume: Mutex<f32>,
    controls_timer: Mutex<Option<ScheduledTask>>,
    unlock_timer: Mutex<Option<ScheduledTask>>,
}

impl UiController {
    #[must_use]
    pub fn new(element: Arc<dyn MediaElement>) -> Arc<Self> {
        Arc::new(Self {
            element,
            state: Arc::new(Mutex::new(PlaybackUiState::default())),
            manifest_live: Mutex::new(false),
            prev_volume: Mutex::new(1.0),
            controls_timer: Mutex::new(None),
            unlock_timer: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> PlaybackUiState {
        self.state.lock().clone()
    }

    /// Fold one bus event into the derived state.
    pub fn on_event(&self, event: &Event) {
        match event {
            Event::Media(MediaEvent::Play) => {
                let mut state = self.state.lock();
                state.is_playing = true;
                state.playback_blocked = false;
            }
            Event::Media(MediaEvent::Pause | MediaEvent::Ended) => {
                self.state.lock().is_playing = false;
            }
            Event::Media(MediaEvent::TimeUpdate { position_secs }) => {
                self.state.lock().progress_secs = *position_secs;
            }
            Event::Media(MediaEvent::DurationChange { duration_secs }) => {
                let manifest_live = *self.manifest_live.lock();
                let mut state = self.state.lock();
                state.duration_secs = *duration_secs;
                state.is_live = manifest_live || duration_secs.is_infinite();
            }
            Event::Media(MediaEvent::EnteredPictureInPicture) => {
                self.state.lock().is_pip = true;
            }
            Event::Media(MediaEvent::LeftPictureInPicture) => {
                self.state.lock().is_pip = false;
            }
            Event::Engine(EngineEvent::SessionLoaded { .. }) => {
                *self.manifest_live.lock() = false;
                let mut state = self.state.lock();
                state.progress_secs = 0.0;
                state.duration_secs = 0.0;
                state.is_live = false;
                state.quality_levels.clear();
                state.current_quality = AUTO_LEVEL;
                state.player_error = None;
                state.playback_blocked = false;
            }
            Event::Engine(EngineEvent::ManifestParsed { live, levels }) => {
                *self.manifest_live.lock() = *live;
                let mut state = self.state.lock();
                state.is_live = *live || state.duration_secs.is_infinite();
                state.player_error = None;
                // A single tier offers no choice; show the picker only for
                // real ladders.
                state.quality_levels = if levels.len() > 1 {
                    dedup_by_height(levels)
                } else {
                    Vec::new()
                };
            }
            Event::Engine(EngineEvent::LevelSwitched { level }) => {
                self.state.lock().current_quality = *level;
            }
            Event::Engine(EngineEvent::TerminalError { message }) => {
                self.state.lock().player_error = Some(message.clone());
            }
            Event::Engine(EngineEvent::PlaybackBlocked) => {
                self.state.lock().playback_blocked = true;
            }
            Event::Host(HostEvent::FullscreenChanged { fullscreen }) => {
                self.state.lock().is_fullscreen = *fullscreen;
                if !fullscreen {
                    // However fullscreen ended, lock state cannot survive it.
                    self.force_unlock();
                }
            }
            _ => {}
        }
    }

    // -- controls visibility --

    /// Pointer movement, taps on controls, or any control interaction.
    ///
    /// Shows the controls and re-arms the auto-hide timer. Suspended while
    /// locked; the unlock affordance has its own timer.
    pub fn user_activity(&self) {
        if self.state.lock().is_locked {
            return;
        }
        self.state.lock().show_controls = true;
        self.arm_controls_timer();
    }

    /// A bare tap on the player surface.
    pub fn tap(&self) {
        if self.state.lock().is_locked {
            self.show_unlock_affordance();
            return;
        }
        let visible = {
            let mut state = self.state.lock();
            state.show_controls = !state.show_controls;
            state.show_controls
        };
        if visible {
            self.arm_controls_timer();
        } else {
            *self.controls_timer.lock() = None;
        }
    }

    /// Pointer left the player surface.
    pub fn pointer_leave(&self) {
        let mut state = self.state.lock();
        if !state.is_locked && !self.element.paused() {
            state.show_controls = false;
            drop(state);
            *self.controls_timer.lock() = None;
        }
    }

    fn arm_controls_timer(&self) {
        let state = Arc::clone(&self.state);
        let element = Arc::clone(&self.element);
        let task = ScheduledTask::once("controls-hide", CONTROLS_HIDE_AFTER, async move {
            let mut state = state.lock();
            if !element.paused() && !state.is_locked {
                state.show_controls = false;
            }
        });
        *self.controls_timer.lock() = Some(task);
    }

    // -- lock --

    pub fn toggle_lock(&self) {
        let now_locked = {
            let mut state = self.state.lock();
            state.is_locked = !state.is_locked;
            state.is_locked
        };
        if now_locked {
            debug!("controls locked");
            *self.controls_timer.lock() = None;
            self.state.lock().show_controls = false;
            self.show_unlock_affordance();
        } else {
            debug!("controls unlocked");
            *self.unlock_timer.lock() = None;
            self.state.lock().show_unlock = false;
            self.user_activity();
        }
    }

    /// Clear lock state regardless of how it was entered. Used when
    /// fullscreen ends by any means.
    pub fn force_unlock(&self) {
        let was_locked = {
            let mut state = self.state.lock();
            let was = state.is_locked;
            state.is_locked = false;
            state.show_unlock = false;
            was
        };
        *self.unlock_timer.lock() = None;
        if was_locked {
            self.user_activity();
        }
    }

    fn show_unlock_affordance(&self) {
        self.state.lock().show_unlock = true;
        let state = Arc::clone(&self.state);
        let task = ScheduledTask::once("unlock-hide", UNLOCK_HIDE_AFTER, async move {
            state.lock().show_unlock = false;
        });
        *self.unlock_timer.lock() = Some(task);
    }

    // -- volume --

    /// Set the volume, `[0, 1]`. Zero mutes; anything else unmutes and is
    /// remembered for mute restore.
    pub fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        let muted = volume == 0.0;
        {
            let mut state = self.state.lock();
            state.volume = volume;
            state.is_muted = muted;
            if !muted {
                *self.prev_volume.lock() = volume;
            }
        }
        self.element.set_volume(volume);
        self.element.set_muted(muted);
        self.user_activity();
    }

    /// Toggle mute, restoring the pre-mute volume level on unmute.
    pub fn toggle_mute(&self) {
        let restore = {
            let mut state = self.state.lock();
            if state.is_muted {
                Some(*self.prev_volume.lock())
            } else {
                if state.volume > 0.0 {
                    *self.prev_volume.lock() = state.volume;
                }
                state.volume = 0.0;
                state.is_muted = true;
                None
            }
        };
        match restore {
            Some(volume) => {
                {
                    let mut state = self.state.lock();
                    state.volume = volume;
                    state.is_muted = false;
                }
                self.element.set_volume(volume);
                self.element.set_muted(false);
            }
            None => {
                self.element.set_volume(0.0);
                self.element.set_muted(true);
            }
        }
        self.user_activity();
    }

    // -- presentation --

    pub fn set_fit_mode(&self, mode: FitMode) {
        self.state.lock().fit_mode = mode;
        self.user_activity();
    }

    /// Record an explicit quality choice (the engine applies it).
    pub fn note_quality(&self, level: i32) {
        self.state.lock().current_quality = level;
        self.user_activity();
    }

    /// Cancel both visibility timers. Called on session teardown.
    pub fn cancel_timers(&self) {
        *self.controls_timer.lock() = None;
        *self.unlock_timer.lock() = None;
    }
}
