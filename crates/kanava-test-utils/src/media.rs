#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use kanava_events::{EventBus, MediaEvent};
use kanava_platform::{MediaElement, MediaError, Mutex, ReadyState};

#[derive(Debug)]
struct ElementState {
    src: Option<String>,
    paused: bool,
    current_time: f64,
    duration: f64,
    seekable_end: Option<f64>,
    ready_state: ReadyState,
    ended: bool,
    volume: f32,
    muted: bool,
    native_hls: bool,
    pip_disabled: bool,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            src: None,
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            seekable_end: None,
            ready_state: ReadyState::Nothing,
            ended: false,
            volume: 1.0,
            muted: false,
            native_hls: false,
            pip_disabled: false,
        }
    }
}

/// In-memory media element.
///
/// Mirrors the observable state of a real element and, when a bus is
/// attached, publishes `Play`/`Pause` as a real adapter would.
#[derive(Default)]
pub struct FakeMediaElement {
    state: Mutex<ElementState>,
    bus: Mutex<Option<EventBus>>,
    next_play_error: Mutex<Option<MediaError>>,
    play_calls: AtomicUsize,
    reload_calls: AtomicUsize,
}

impl FakeMediaElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish play/pause transitions on `bus`, like a real adapter.
    pub fn attach_bus(&self, bus: EventBus) {
        *self.bus.lock() = Some(bus);
    }

    /// Make the next `play()` call fail with `error`.
    pub fn fail_next_play(&self, error: MediaError) {
        *self.next_play_error.lock() = Some(error);
    }

    pub fn set_duration(&self, duration: f64) {
        self.state.lock().duration = duration;
    }

    pub fn set_seekable_end(&self, end: Option<f64>) {
        self.state.lock().seekable_end = end;
    }

    pub fn set_ready_state(&self, ready_state: ReadyState) {
        self.state.lock().ready_state = ready_state;
    }

    pub fn set_ended(&self, ended: bool) {
        self.state.lock().ended = ended;
    }

    pub fn set_native_hls(&self, supported: bool) {
        self.state.lock().native_hls = supported;
    }

    pub fn set_pip_disabled(&self, disabled: bool) {
        self.state.lock().pip_disabled = disabled;
    }

    #[must_use]
    pub fn source(&self) -> Option<String> {
        self.state.lock().src.clone()
    }

    #[must_use]
    pub fn play_calls(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn reload_calls(&self) -> usize {
        self.reload_calls.load(Ordering::SeqCst)
    }

    fn publish(&self, event: MediaEvent) {
        if let Some(bus) = self.bus.lock().as_ref() {
            bus.publish(event);
        }
    }
}

#[async_trait]
impl MediaElement for FakeMediaElement {
    async fn play(&self) -> Result<(), MediaError> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.next_play_error.lock().take() {
            return Err(error);
        }
        self.state.lock().paused = false;
        self.publish(MediaEvent::Play);
        Ok(())
    }

    fn pause(&self) {
        self.state.lock().paused = true;
        self.publish(MediaEvent::Pause);
    }

    fn set_source(&self, url: &str) {
        self.state.lock().src = Some(url.to_owned());
    }

    fn clear_source(&self) {
        self.state.lock().src = None;
    }

    fn reload(&self) {
        self.reload_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn current_time(&self) -> f64 {
        self.state.lock().current_time
    }

    fn set_current_time(&self, secs: f64) {
        self.state.lock().current_time = secs;
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration
    }

    fn seekable_end(&self) -> Option<f64> {
        self.state.lock().seekable_end
    }

    fn ready_state(&self) -> ReadyState {
        self.state.lock().ready_state
    }

    fn ended(&self) -> bool {
        self.state.lock().ended
    }

    fn paused(&self) -> bool {
        self.state.lock().paused
    }

    fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    fn set_volume(&self, volume: f32) {
        self.state.lock().volume = volume;
    }

    fn muted(&self) -> bool {
        self.state.lock().muted
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().muted = muted;
    }

    fn supports_native_hls(&self) -> bool {
        self.state.lock().native_hls
    }

    fn pip_disabled(&self) -> bool {
        self.state.lock().pip_disabled
    }
}
