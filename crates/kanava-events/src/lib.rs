#![forbid(unsafe_code)]

//! Unified event bus and the typed event hierarchy of the player.
//!
//! Components never poll each other: the media element adapter and the
//! playback engine publish here, and everything else (UI controller,
//! recovery supervisor, media session bridge, keep-alive) subscribes.

mod bus;
mod engine;
mod event;
mod host;
mod media;

pub use bus::EventBus;
pub use engine::{EngineEvent, FaultKind};
pub use event::Event;
pub use host::{HostEvent, MediaActionKind, MediaSessionAction};
pub use media::MediaEvent;
