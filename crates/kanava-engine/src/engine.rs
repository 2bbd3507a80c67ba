#![forbid(unsafe_code)]

use std::{sync::Arc, time::Duration};

use kanava_core::{resolve, Channel, ChannelId, QualityLevel, ResolvedSource, StreamKind, AUTO_LEVEL};
use kanava_events::{EngineEvent, Event, EventBus, FaultKind, MediaEvent};
use kanava_platform::{MediaElement, MediaError, Mutex, PipHost, ScheduledTask};
use tracing::{debug, warn};

use crate::{
    adaptive::{AdaptiveFactory, AdaptiveSession},
    error::{EngineError, EngineResult},
    options::TunedOptions,
    recovery::{RecoveryAction, RecoveryPolicy, RecoverySupervisor},
};

/// How long playback may sit in `waiting` before the watchdog intervenes.
const STALL_WATCHDOG: Duration = Duration::from_secs(10);

/// One playback session bound to the engine's media element.
pub struct PlaybackSession {
    channel_id: ChannelId,
    resolved: ResolvedSource,
    adaptive: Option<Box<dyn AdaptiveSession>>,
}

impl PlaybackSession {
    #[must_use]
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    #[must_use]
    pub fn resolved(&self) -> &ResolvedSource {
        &self.resolved
    }

    /// Whether an adaptive-streaming session is attached (false for
    /// progressive MP4 and native HLS playback).
    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        self.adaptive.is_some()
    }
}

struct Inner {
    session: Option<PlaybackSession>,
    /// Last loaded channel, kept for backoff reloads.
    channel: Option<Channel>,
    manifest_live: bool,
    levels: Vec<QualityLevel>,
    current_level: i32,
    supervisor: RecoverySupervisor,
    retry_task: Option<ScheduledTask>,
    stall_task: Option<ScheduledTask>,
    /// For adaptive loads, autoplay waits for the manifest parse.
    autoplay_deferred: bool,
    terminal: Option<String>,
}

/// Owns the media element binding and the one active [`PlaybackSession`].
///
/// All faults surface on the event bus; nothing here returns streaming
/// errors to the caller. Drive the engine from a single event pump that
/// forwards every bus event into [`dispatch`].
///
/// [`dispatch`]: PlaybackEngine::dispatch
pub struct PlaybackEngine {
    element: Arc<dyn MediaElement>,
    factory: Arc<dyn AdaptiveFactory>,
    pip: Arc<dyn PipHost>,
    bus: EventBus,
    options: TunedOptions,
    inner: Mutex<Inner>,
}

impl PlaybackEngine {
    #[must_use]
    pub fn new(
        element: Arc<dyn MediaElement>,
        factory: Arc<dyn AdaptiveFactory>,
        pip: Arc<dyn PipHost>,
        bus: EventBus,
        options: TunedOptions,
        policy: RecoveryPolicy,
    ) -> Arc<Self> {
        Arc::new(Self {
            element,
            factory,
            pip,
            bus,
            options,
            inner: Mutex::new(Inner {
                session: None,
                channel: None,
                manifest_live: false,
                levels: Vec::new(),
                current_level: AUTO_LEVEL,
                supervisor: RecoverySupervisor::new(policy),
                retry_task: None,
                stall_task: None,
                autoplay_deferred: false,
                terminal: None,
            }),
        })
    }

    /// Load a channel, superseding any current session.
    ///
    /// The previous session is fully detached from the element before the
    /// new one attaches. If the element is currently the active
    /// Picture-in-Picture target the old session must keep running, so this
    /// returns [`EngineError::ElementHeldByPip`] and the host should start
    /// the new channel on a fresh element instead.
    pub async fn load(self: &Arc<Self>, channel: &Channel) -> EngineResult<()> {
        self.load_channel(channel, true).await
    }

    async fn load_channel(self: &Arc<Self>, channel: &Channel, fresh: bool) -> EngineResult<()> {
        if !self.teardown(false) {
            return Err(EngineError::ElementHeldByPip);
        }

        let resolved = resolve(&channel.stream_url, channel.kind);
        debug!(channel = %channel.id, transport = ?resolved.transport, fresh, "loading channel");

        {
            let mut inner = self.inner.lock();
            inner.channel = Some(channel.clone());
            inner.manifest_live = false;
            inner.levels.clear();
            inner.current_level = AUTO_LEVEL;
            inner.terminal = None;
            inner.autoplay_deferred = false;
            if fresh {
                inner.supervisor.reset();
            }
        }

        match resolved.transport {
            StreamKind::Iframe => {
                // Embedded players are mounted by the host view, not here.
                warn!(channel = %channel.id, "iframe channel passed to the playback engine; ignoring");
                Ok(())
            }
            StreamKind::Mp4 => {
                self.element.set_source(&resolved.url);
                self.install_session(channel, resolved, None, false);
                self.attempt_autoplay().await;
                Ok(())
            }
            StreamKind::Hls => {
                if self.factory.is_supported() {
                    let adaptive = self.factory.create(
                        &resolved.url,
                        &self.options,
                        Arc::clone(&self.element),
                        self.bus.clone(),
                    );
                    adaptive.start_load();
                    self.install_session(channel, resolved, Some(adaptive), true);
                    Ok(())
                } else if self.element.supports_native_hls() {
                    self.element.set_source(&resolved.url);
                    self.install_session(channel, resolved, None, false);
                    self.attempt_autoplay().await;
                    Ok(())
                } else {
                    self.apply_action(RecoveryAction::Terminal {
                        message: "Adaptive streaming is not supported on this platform."
                            .to_owned(),
                    })
                    .await;
                    Ok(())
                }
            }
        }
    }

    fn install_session(
        &self,
        channel: &Channel,
        resolved: ResolvedSource,
        adaptive: Option<Box<dyn AdaptiveSession>>,
        defer_autoplay: bool,
    ) {
        let transport = resolved.transport;
        {
            let mut inner = self.inner.lock();
            inner.session = Some(PlaybackSession {
                channel_id: channel.id.clone(),
                resolved,
                adaptive,
            });
            inner.autoplay_deferred = defer_autoplay;
        }
        self.bus.publish(EngineEvent::SessionLoaded {
            channel: channel.id.clone(),
            transport,
        });
    }

    /// Begin playback if paused. A no-op while already playing.
    pub async fn play(&self) {
        if !self.element.paused() {
            return;
        }
        self.attempt_autoplay().await;
    }

    /// Pause playback if playing. A no-op while already paused.
    pub fn pause(&self) {
        if !self.element.paused() {
            self.element.pause();
        }
    }

    /// Seek by a relative offset, clamped to the seekable range.
    ///
    /// VOD clamps to `[0, duration]`; live clamps to the live seekable
    /// window. With no known seekable end on a live stream the seek is
    /// dropped.
    pub fn seek(&self, delta_secs: f64) {
        let target = self.element.current_time() + delta_secs;
        let clamped = if self.is_live() {
            match self.element.seekable_end() {
                Some(edge) => target.clamp(0.0, edge),
                None => return,
            }
        } else {
            let duration = self.element.duration();
            if duration.is_finite() && duration > 0.0 {
                target.clamp(0.0, duration)
            } else {
                target.max(0.0)
            }
        };
        self.element.set_current_time(clamped);
    }

    /// Pin a quality tier ([`AUTO_LEVEL`] restores automatic selection).
    ///
    /// Only meaningful for adaptive sessions with more than one tier.
    pub fn set_quality(&self, level: i32) -> EngineResult<()> {
        let mut inner = self.inner.lock();
        {
            let session = inner.session.as_ref().ok_or(EngineError::NoSession)?;
            let adaptive = session.adaptive.as_ref().ok_or(EngineError::NotAdaptive)?;
            adaptive.set_current_level(level);
        }
        inner.current_level = level;
        Ok(())
    }

    /// Destroy the session and leave the element empty.
    ///
    /// Returns `false` when teardown was deferred because the element is
    /// the active Picture-in-Picture target; the session then survives
    /// until PiP exits.
    pub fn unload(&self) -> bool {
        if !self.teardown(false) {
            return false;
        }
        self.element.pause();
        self.element.clear_source();
        self.element.reload();
        true
    }

    /// Tear down unconditionally, ignoring the PiP exception.
    pub fn force_unload(&self) {
        self.teardown(true);
        self.element.pause();
        self.element.clear_source();
        self.element.reload();
    }

    /// Feed one bus event through the engine's state machine.
    pub async fn dispatch(self: &Arc<Self>, event: &Event) {
        match event {
            Event::Engine(EngineEvent::ManifestParsed { live, levels }) => {
                let autoplay = {
                    let mut inner = self.inner.lock();
                    inner.manifest_live = *live;
                    inner.levels = levels.clone();
                    inner.terminal = None;
                    inner.supervisor.on_manifest_parsed();
                    std::mem::take(&mut inner.autoplay_deferred)
                };
                debug!(live, levels = levels.len(), "manifest parsed");
                if autoplay {
                    self.attempt_autoplay().await;
                }
            }
            Event::Engine(EngineEvent::LevelSwitched { level }) => {
                self.inner.lock().current_level = *level;
            }
            Event::Engine(EngineEvent::Fault {
                kind,
                fatal,
                details,
            }) => {
                self.handle_fault(*kind, *fatal, details).await;
            }
            Event::Media(MediaEvent::Waiting) => self.arm_stall_watchdog(),
            Event::Media(
                MediaEvent::Playing | MediaEvent::TimeUpdate { .. } | MediaEvent::Pause,
            ) => {
                self.inner.lock().stall_task = None;
            }
            _ => {}
        }
    }

    async fn handle_fault(self: &Arc<Self>, kind: FaultKind, fatal: bool, details: &str) {
        let action = {
            let mut inner = self.inner.lock();
            let live = inner.manifest_live || self.element.duration().is_infinite();
            inner.supervisor.on_fault(
                kind,
                fatal,
                details,
                live,
                self.element.seekable_end().is_some(),
            )
        };
        if action != RecoveryAction::Ignore {
            debug!(?kind, fatal, details, ?action, "fault classified");
        }
        self.apply_action(action).await;
    }

    fn apply_action(
        self: &Arc<Self>,
        action: RecoveryAction,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
        match action {
            RecoveryAction::RetryAfter { attempt, delay } => {
                self.bus
                    .publish(EngineEvent::RetryScheduled { attempt, delay });
                let weak = Arc::downgrade(self);
                let task = ScheduledTask::once("retry-backoff", delay, async move {
                    if let Some(engine) = weak.upgrade() {
                        engine.reload_current().await;
                    }
                });
                self.inner.lock().retry_task = Some(task);
            }
            RecoveryAction::RecoverMedia => {
                let inner = self.inner.lock();
                if let Some(adaptive) = inner.session.as_ref().and_then(|s| s.adaptive.as_ref()) {
                    adaptive.recover_media_error();
                }
            }
            RecoveryAction::SeekToLiveEdge => {
                if let Some(edge) = self.element.seekable_end() {
                    self.element.set_current_time(edge);
                }
            }
            RecoveryAction::ResumeLoad => {
                let inner = self.inner.lock();
                if let Some(adaptive) = inner.session.as_ref().and_then(|s| s.adaptive.as_ref()) {
                    adaptive.start_load();
                }
            }
            RecoveryAction::Terminal { message } => {
                self.bus.publish(EngineEvent::TerminalError {
                    message: message.clone(),
                });
                self.teardown(true);
                self.inner.lock().terminal = Some(message);
            }
            RecoveryAction::Ignore => {}
        }
        })
    }

    async fn reload_current(self: Arc<Self>) {
        let channel = self.inner.lock().channel.clone();
        if let Some(channel) = channel {
            debug!(channel = %channel.id, "reloading after backoff");
            if let Err(err) = self.load_channel(&channel, false).await {
                warn!(error = %err, "backoff reload skipped");
            }
        }
    }

    fn arm_stall_watchdog(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let task = ScheduledTask::once("stall-watchdog", STALL_WATCHDOG, async move {
            if let Some(engine) = weak.upgrade() {
                engine.handle_stall_timeout().await;
            }
        });
        self.inner.lock().stall_task = Some(task);
    }

    async fn handle_stall_timeout(self: Arc<Self>) {
        warn!("playback stuck in waiting state past the watchdog window");
        let live = self.is_live();
        let edge_known = self.element.seekable_end().is_some();
        let action = self.inner.lock().supervisor.on_stall_timeout(live, edge_known);
        let resume = action == RecoveryAction::SeekToLiveEdge;
        self.apply_action(action).await;
        if resume {
            self.play().await;
        }
    }

    async fn attempt_autoplay(&self) {
        match self.element.play().await {
            Ok(()) => {}
            Err(MediaError::Aborted) => {
                // A superseding load interrupted the attempt; expected.
                debug!("autoplay aborted by a newer load");
            }
            Err(MediaError::PolicyBlocked) => {
                debug!("autoplay blocked by policy; waiting for user gesture");
                self.bus.publish(EngineEvent::PlaybackBlocked);
            }
            Err(err) => warn!(error = %err, "autoplay failed"),
        }
    }

    /// Detach the current session. Returns `false` if teardown was deferred
    /// because the element is the active PiP target.
    fn teardown(&self, force: bool) -> bool {
        if !force && self.pip.is_active_target() {
            debug!("element held by picture-in-picture; deferring teardown");
            return false;
        }
        let session = {
            let mut inner = self.inner.lock();
            inner.retry_task = None;
            inner.stall_task = None;
            inner.session.take()
        };
        if let Some(session) = session {
            if let Some(adaptive) = session.adaptive {
                adaptive.destroy();
            }
            self.bus.publish(EngineEvent::SessionClosed);
        }
        true
    }

    // -- state reads --

    /// Live if the manifest declared it or the element reports an infinite
    /// duration.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.inner.lock().manifest_live || self.element.duration().is_infinite()
    }

    /// Manifest quality tiers in manifest order (not display-deduped).
    #[must_use]
    pub fn quality_levels(&self) -> Vec<QualityLevel> {
        self.inner.lock().levels.clone()
    }

    #[must_use]
    pub fn current_level(&self) -> i32 {
        self.inner.lock().current_level
    }

    #[must_use]
    pub fn terminal_error(&self) -> Option<String> {
        self.inner.lock().terminal.clone()
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.inner.lock().session.is_some()
    }

    #[must_use]
    pub fn session_channel(&self) -> Option<ChannelId> {
        self.inner
            .lock()
            .session
            .as_ref()
            .map(|s| s.channel_id().clone())
    }

    #[must_use]
    pub fn current_channel(&self) -> Option<Channel> {
        self.inner.lock().channel.clone()
    }

    #[must_use]
    pub fn element(&self) -> Arc<dyn MediaElement> {
        Arc::clone(&self.element)
    }

    #[must_use]
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.inner.lock().supervisor.retry_count()
    }
}

#[allow(dead_code)]
fn __assert_send_sync() {
    fn is_send_sync<T: Send + Sync>() {}
    is_send_sync::<PlaybackEngine>();
}
