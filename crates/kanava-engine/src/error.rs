#![forbid(unsafe_code)]

use thiserror::Error;

/// Playback engine errors.
///
/// Faults from the streaming pipeline itself do not surface here — they
/// flow through the event bus and the recovery supervisor. These are the
/// errors of driving the engine API wrong.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("no active playback session")]
    NoSession,

    #[error("quality selection requires an adaptive session")]
    NotAdaptive,

    #[error("media element is held by an active picture-in-picture session")]
    ElementHeldByPip,

    #[error("media element error: {0}")]
    Media(#[from] kanava_platform::MediaError),
}

pub type EngineResult<T> = Result<T, EngineError>;
