use thiserror::Error;

/// Player layer errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayError {
    #[error("engine error: {0}")]
    Engine(#[from] kanava_engine::EngineError),

    #[error("platform error: {0}")]
    Platform(#[from] kanava_platform::PlatformError),

    #[error("channel not found: {0}")]
    ChannelNotFound(String),
}

pub type PlayResult<T> = Result<T, PlayError>;
