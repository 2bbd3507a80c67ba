#![forbid(unsafe_code)]

//! Platform capability adapters.
//!
//! The player core never talks to a concrete platform. Every capability it
//! needs from the host — the media element, fullscreen, orientation lock,
//! Picture-in-Picture, wake lock, the OS media session — is a trait here,
//! implemented once per target platform. Hosts feature-detect at adapter
//! construction time; a missing capability is expressed through
//! `is_supported()` and degrades gracefully, never as an error panel.
//!
//! Also home to the synchronization re-exports and the named cancellable
//! [`ScheduledTask`] every component uses for its timers.

mod error;
mod fullscreen;
mod media_element;
mod media_session;
mod pip;
mod task;
pub mod time;
mod wake;

pub use error::{MediaError, PlatformError, PlatformResult};
pub use fullscreen::{FullscreenSurface, OrientationLock};
pub use media_element::{MediaElement, ReadyState};
pub use media_session::{Artwork, MediaSessionSurface, NowPlaying, PlaybackState};
#[cfg(any(test, feature = "test-utils"))]
pub use media_session::MediaSessionSurfaceMock;
pub use pip::PipHost;
pub use task::ScheduledTask;
pub use wake::WakeLock;

// Synchronization primitives used across the workspace.
pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
