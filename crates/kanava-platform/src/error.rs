#![forbid(unsafe_code)]

use thiserror::Error;

/// Failure starting playback on the media element.
///
/// The distinction matters to the recovery supervisor: an [`Aborted`]
/// rejection means the load was superseded and is never user-facing, while
/// [`PolicyBlocked`] is surfaced as a tap-to-play prompt.
///
/// [`Aborted`]: MediaError::Aborted
/// [`PolicyBlocked`]: MediaError::PolicyBlocked
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum MediaError {
    #[error("playback aborted by a superseding load")]
    Aborted,

    #[error("autoplay blocked by platform policy")]
    PolicyBlocked,

    #[error("operation not supported on this platform")]
    Unsupported,

    #[error("{0}")]
    Other(String),
}

/// Failure of a platform capability request (fullscreen, PiP, orientation,
/// wake lock).
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum PlatformError {
    #[error("denied by platform policy")]
    Denied,

    #[error("not supported on this platform")]
    Unsupported,

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("{0}")]
    Other(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;
