#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

//! The player layer on top of the playback engine.
//!
//! A watch view creates one [`WatchSession`] per mounted player. The
//! session owns the engine, the UI state controller with its auto-hide
//! timers, channel navigation, and the Picture-in-Picture, fullscreen,
//! wake-lock, and media-session managers — and it wires them all to the
//! shared event bus through a single event pump.

mod error;
mod fullscreen;
mod media_session;
mod navigation;
mod pip;
mod session;
mod types;
mod ui;
mod wake;

pub use error::{PlayError, PlayResult};
pub use fullscreen::FullscreenController;
pub use media_session::MediaSessionBridge;
pub use navigation::{
    ListKind, NavDirection, NavigationContext, NavigationCoordinator, NavigationRequest,
};
pub use pip::{PipLeaveAction, PipManager, PipState};
pub use session::{
    NavigationSink, PlatformHandles, WatchSession, WatchSessionConfig, WatchViewProbe,
};
pub use types::{
    FitMode, PlaybackUiState, SwipeDirection, CONTROLS_HIDE_AFTER, DEFAULT_SEEK_STEP_SECS,
    UNLOCK_HIDE_AFTER,
};
pub use ui::UiController;
pub use wake::KeepAlive;
