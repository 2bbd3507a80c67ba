#![forbid(unsafe_code)]

//! The playback engine: session lifecycle on a media element, adaptive
//! streaming behind a seam, and fault recovery.
//!
//! The engine owns exactly one [`PlaybackSession`] at a time and treats the
//! media element as a single-writer resource. The one sanctioned exception:
//! an element held by an active Picture-in-Picture window is never torn
//! down by a superseding load — that session survives until PiP exits.

mod adaptive;
mod engine;
mod error;
mod options;
mod recovery;

pub use adaptive::{AdaptiveFactory, AdaptiveSession};
pub use engine::{PlaybackEngine, PlaybackSession};
pub use error::{EngineError, EngineResult};
pub use options::TunedOptions;
pub use recovery::{RecoveryAction, RecoveryPolicy, RecoverySupervisor, MAX_RETRIES};
