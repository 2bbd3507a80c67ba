#![forbid(unsafe_code)]

//! # Kanava
//!
//! Facade crate for the live-TV playback controller: channel catalog
//! model, adaptive playback engine with fault recovery, and the player
//! layer (UI state, navigation, Picture-in-Picture, fullscreen, wake lock,
//! media session).
//!
//! ## Quick start
//!
//! ```ignore
//! use kanava::prelude::*;
//!
//! let session = WatchSession::start(
//!     channel,
//!     NavigationContext::all(),
//!     directory,
//!     platform_handles,
//!     adaptive_factory,
//!     EventBus::default(),
//!     navigate_sink,
//!     watch_view_probe,
//!     WatchSessionConfig::default(),
//! )
//! .await?;
//!
//! session.swipe(SwipeDirection::Left); // next channel via the sink
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod core {
    pub use kanava_core::*;
}

pub mod events {
    pub use kanava_events::*;
}

pub mod platform {
    pub use kanava_platform::*;
}

pub mod engine {
    pub use kanava_engine::*;
}

pub mod play {
    pub use kanava_play::*;
}

/// The types most hosts need.
pub mod prelude {
    pub use kanava_core::{Channel, ChannelDirectory, ChannelId, StreamKind};
    pub use kanava_engine::{AdaptiveFactory, PlaybackEngine, TunedOptions};
    pub use kanava_events::{Event, EventBus};
    pub use kanava_play::{
        NavigationContext, NavigationRequest, PlatformHandles, PlaybackUiState, SwipeDirection,
        WatchSession, WatchSessionConfig,
    };
}
