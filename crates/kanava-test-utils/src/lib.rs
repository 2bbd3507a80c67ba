#![forbid(unsafe_code)]

//! Shared test fakes for the kanava workspace.
//!
//! Stateful in-memory stand-ins for the platform capability traits, plus a
//! small channel catalog fixture. The fakes publish the same bus events a
//! real platform adapter would, so engine and player tests exercise the
//! full event path.

mod adaptive;
mod fixtures;
mod media;
mod media_session;
mod pip;
mod surface;
mod wake;

pub use adaptive::{FakeAdaptiveFactory, FakeAdaptiveSession};
pub use fixtures::{test_catalog, test_channel};
pub use media::FakeMediaElement;
pub use media_session::RecordingMediaSession;
pub use pip::FakePipHost;
pub use surface::{FakeFullscreenSurface, FakeOrientationLock};
pub use wake::FakeWakeLock;
