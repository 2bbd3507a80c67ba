use std::sync::Arc;

use kanava_core::{Channel, ChannelDirectory};
use kanava_engine::{AdaptiveFactory, PlaybackEngine, RecoveryPolicy, TunedOptions};
use kanava_events::{
    EngineEvent, Event, EventBus, HostEvent, MediaEvent, MediaSessionAction,
};
use kanava_platform::{
    FullscreenSurface, MediaElement, MediaSessionSurface, Mutex, OrientationLock, PipHost,
    ScheduledTask, WakeLock,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::{
    error::PlayResult,
    fullscreen::FullscreenController,
    media_session::MediaSessionBridge,
    navigation::{NavDirection, NavigationContext, NavigationCoordinator, NavigationRequest},
    pip::{PipLeaveAction, PipManager},
    types::{FitMode, PlaybackUiState, SwipeDirection, DEFAULT_SEEK_STEP_SECS},
    ui::UiController,
    wake::KeepAlive,
};

/// Everything the host platform provides for one player surface.
#[derive(Clone)]
pub struct PlatformHandles {
    pub element: Arc<dyn MediaElement>,
    pub fullscreen: Arc<dyn FullscreenSurface>,
    pub orientation: Arc<dyn OrientationLock>,
    pub pip: Arc<dyn PipHost>,
    pub wake_lock: Arc<dyn WakeLock>,
    pub media_session: Arc<dyn MediaSessionSurface>,
}

/// Receives computed navigation targets; the host performs the actual
/// navigation.
pub type NavigationSink = Arc<dyn Fn(NavigationRequest) + Send + Sync>;

/// Whether the view that created this session is still the hosting view.
/// Drives the leave-PiP keep-or-teardown decision.
pub type WatchViewProbe = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone, Debug)]
pub struct WatchSessionConfig {
    pub seek_step_secs: f64,
    pub tuned: TunedOptions,
    pub policy: RecoveryPolicy,
}

impl Default for WatchSessionConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: DEFAULT_SEEK_STEP_SECS,
            tuned: TunedOptions::default(),
            policy: RecoveryPolicy::default(),
        }
    }
}

/// One mounted player: engine, controllers, and the event pump binding
/// them.
///
/// Created when a watch view mounts, shut down when it unmounts. This is
/// the playback handle the host talks to; it never navigates on its own,
/// it only reports computed targets through the [`NavigationSink`].
pub struct WatchSession {
    channel: Channel,
    engine: Arc<PlaybackEngine>,
    ui: Arc<UiController>,
    pip: PipManager,
    fullscreen: FullscreenController,
    keep_alive: KeepAlive,
    media_bridge: MediaSessionBridge,
    coordinator: NavigationCoordinator,
    bus: EventBus,
    navigate: NavigationSink,
    is_watch_view: WatchViewProbe,
    seek_step: f64,
    pump: Mutex<Option<ScheduledTask>>,
}

impl WatchSession {
    /// Mount a session: close any stale PiP window, wire all components to
    /// the bus, and start loading the channel.
    #[allow(clippy::too_many_arguments)]
    pub async fn start(
        channel: Channel,
        context: NavigationContext,
        directory: Arc<dyn ChannelDirectory>,
        platform: PlatformHandles,
        factory: Arc<dyn AdaptiveFactory>,
        bus: EventBus,
        navigate: NavigationSink,
        is_watch_view: WatchViewProbe,
        config: WatchSessionConfig,
    ) -> PlayResult<Arc<Self>> {
        // A floating window left over from a previous channel would keep
        // its session alive forever; close it before attaching.
        if platform.pip.has_active_target() {
            debug!("exiting stale picture-in-picture session from a previous channel");
            let _ = platform.pip.exit().await;
        }

        let engine = PlaybackEngine::new(
            Arc::clone(&platform.element),
            factory,
            Arc::clone(&platform.pip),
            bus.clone(),
            config.tuned,
            config.policy,
        );
        let ui = UiController::new(Arc::clone(&platform.element));
        let session = Arc::new(Self {
            engine,
            ui: Arc::clone(&ui),
            pip: PipManager::new(Arc::clone(&platform.pip), Arc::clone(&platform.element)),
            fullscreen: FullscreenController::new(
                Arc::clone(&platform.fullscreen),
                Arc::clone(&platform.orientation),
                ui,
            ),
            keep_alive: KeepAlive::new(
                Arc::clone(&platform.wake_lock),
                Arc::clone(&platform.element),
            ),
            media_bridge: MediaSessionBridge::new(Arc::clone(&platform.media_session)),
            coordinator: NavigationCoordinator::new(directory, context),
            bus,
            navigate,
            is_watch_view,
            seek_step: config.seek_step_secs,
            pump: Mutex::new(None),
            channel,
        });

        session.media_bridge.publish_channel(&session.channel);
        session.media_bridge.update_actions(false);
        session.spawn_pump();
        session.engine.load(&session.channel).await?;
        Ok(session)
    }

    /// [`start`] for hosts that only have the route's channel id.
    ///
    /// [`start`]: WatchSession::start
    #[allow(clippy::too_many_arguments)]
    pub async fn start_by_id(
        channel_id: &str,
        context: NavigationContext,
        directory: Arc<dyn ChannelDirectory>,
        platform: PlatformHandles,
        factory: Arc<dyn AdaptiveFactory>,
        bus: EventBus,
        navigate: NavigationSink,
        is_watch_view: WatchViewProbe,
        config: WatchSessionConfig,
    ) -> PlayResult<Arc<Self>> {
        let channel = directory
            .channel_by_id(channel_id)
            .ok_or_else(|| crate::error::PlayError::ChannelNotFound(channel_id.to_owned()))?;
        Self::start(
            channel,
            context,
            directory,
            platform,
            factory,
            bus,
            navigate,
            is_watch_view,
            config,
        )
        .await
    }

    fn spawn_pump(self: &Arc<Self>) {
        let mut rx = self.bus.subscribe();
        let weak = Arc::downgrade(self);
        let task = ScheduledTask::spawn("event-pump", async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let Some(session) = weak.upgrade() else { break };
                        session.handle_event(&event).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event pump lagged behind the bus");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        *self.pump.lock() = Some(task);
    }

    async fn handle_event(self: &Arc<Self>, event: &Event) {
        self.engine.dispatch(event).await;
        self.ui.on_event(event);
        self.media_bridge.on_event(event);

        match event {
            Event::Media(MediaEvent::Play) => self.keep_alive.on_playing().await,
            Event::Media(MediaEvent::Pause) => self.keep_alive.on_paused().await,
            Event::Media(MediaEvent::EnteredPictureInPicture) => self.pip.on_entered(),
            Event::Media(MediaEvent::LeftPictureInPicture) => self.handle_pip_leave().await,
            Event::Media(MediaEvent::DurationChange { .. }) => {
                self.media_bridge.update_actions(self.engine.is_live());
            }
            Event::Engine(EngineEvent::ManifestParsed { live, .. }) => {
                self.media_bridge.update_actions(*live);
            }
            Event::Host(HostEvent::FullscreenChanged { fullscreen }) => {
                self.fullscreen.on_fullscreen_changed(*fullscreen);
            }
            Event::Host(HostEvent::VisibilityChanged { visible }) => {
                self.keep_alive.on_visibility(*visible).await;
            }
            Event::Host(HostEvent::MediaAction(action)) => {
                self.handle_media_action(*action).await;
            }
            _ => {}
        }
    }

    async fn handle_media_action(&self, action: MediaSessionAction) {
        match action {
            MediaSessionAction::Play => self.engine.play().await,
            MediaSessionAction::Pause => self.engine.pause(),
            MediaSessionAction::NextTrack => self.navigate_relative(NavDirection::Next),
            MediaSessionAction::PreviousTrack => self.navigate_relative(NavDirection::Previous),
            MediaSessionAction::SeekForward { offset_secs } => {
                if !self.engine.is_live() {
                    self.engine.seek(offset_secs.unwrap_or(self.seek_step));
                }
            }
            MediaSessionAction::SeekBackward { offset_secs } => {
                if !self.engine.is_live() {
                    self.engine.seek(-offset_secs.unwrap_or(self.seek_step));
                }
            }
            _ => {}
        }
    }

    async fn handle_pip_leave(&self) {
        match self.pip.on_left((self.is_watch_view)()) {
            PipLeaveAction::ResumeInline => {
                // Survives with its manifest: no re-fetch, just resume.
                if self.pip.looks_like_restore() {
                    self.engine.play().await;
                }
            }
            PipLeaveAction::Teardown => {
                debug!("picture-in-picture closed away from the watch view; tearing down");
                self.media_bridge.clear();
                self.keep_alive.teardown().await;
                self.engine.unload();
                if let Some(pump) = self.pump.lock().take() {
                    pump.cancel();
                }
            }
        }
    }

    // -- host-facing handle --

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    #[must_use]
    pub fn media_element(&self) -> Arc<dyn MediaElement> {
        self.engine.element()
    }

    #[must_use]
    pub fn ui_state(&self) -> PlaybackUiState {
        self.ui.snapshot()
    }

    #[must_use]
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// The host detected a horizontal swipe over the player surface.
    ///
    /// Ignored while locked; disabled for iframe channels. On success the
    /// computed target is delivered through the [`NavigationSink`].
    pub fn swipe(&self, direction: SwipeDirection) {
        if self.ui.snapshot().is_locked {
            return;
        }
        if let Some(request) = self.coordinator.swipe_target(&self.channel, direction) {
            (self.navigate)(request);
        }
    }

    /// Explicit previous/next controls (buttons, OS media keys).
    pub fn navigate_relative(&self, direction: NavDirection) {
        self.ui.user_activity();
        if let Some(request) = self.coordinator.target(&self.channel.id, direction) {
            (self.navigate)(request);
        }
    }

    /// The user hit the main play/pause control.
    pub async fn toggle_play(&self) {
        if self.media_element().paused() {
            self.engine.play().await;
        } else {
            self.engine.pause();
        }
        self.ui.user_activity();
    }

    /// Relative seek from on-screen controls.
    pub fn seek(&self, delta_secs: f64) {
        self.engine.seek(delta_secs);
        self.ui.user_activity();
    }

    pub fn set_volume(&self, volume: f32) {
        self.ui.set_volume(volume);
    }

    pub fn toggle_mute(&self) {
        self.ui.toggle_mute();
    }

    pub fn toggle_lock(&self) {
        self.ui.toggle_lock();
    }

    pub fn tap(&self) {
        self.ui.tap();
    }

    pub fn pointer_moved(&self) {
        self.ui.user_activity();
    }

    pub fn pointer_left(&self) {
        self.ui.pointer_leave();
    }

    pub fn set_fit_mode(&self, mode: FitMode) {
        self.ui.set_fit_mode(mode);
    }

    /// Pin a quality tier and reflect it in the UI immediately.
    pub fn select_quality(&self, level: i32) {
        if let Err(err) = self.engine.set_quality(level) {
            warn!(error = %err, level, "quality selection ignored");
            return;
        }
        self.ui.note_quality(level);
    }

    pub async fn toggle_fullscreen(&self) {
        self.fullscreen.toggle().await;
    }

    pub async fn toggle_picture_in_picture(&self) -> PlayResult<()> {
        self.ui.user_activity();
        self.pip.toggle().await
    }

    /// Leaving the view while playing: hand the stream to a floating
    /// window instead of killing it.
    pub async fn release_to_pip(&self) {
        if self.media_element().paused() {
            return;
        }
        if self.pip.is_available() && !self.pip.is_active() {
            if let Err(err) = self.pip.request().await {
                debug!(error = %err, "automatic picture-in-picture handoff failed");
            }
        }
    }

    /// Unmount. Cancels every timer this session armed; the engine session
    /// itself survives only if the element is currently held by
    /// Picture-in-Picture, in which case teardown completes on leave.
    pub async fn shutdown(&self) {
        self.ui.cancel_timers();
        self.media_bridge.clear();
        self.keep_alive.teardown().await;
        if self.engine.unload() {
            if let Some(pump) = self.pump.lock().take() {
                pump.cancel();
            }
        } else {
            debug!("session held by picture-in-picture; teardown deferred until leave");
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.ui.cancel_timers();
        if let Some(pump) = self.pump.lock().take() {
            pump.cancel();
        }
    }
}
