#![forbid(unsafe_code)]

use std::time::Duration;

use kanava_core::{ChannelId, QualityLevel, StreamKind};

/// Classification of an adaptive-streaming fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Manifest, level, or fragment request failed.
    Network,
    /// Decode or append failure inside the media pipeline.
    Media,
    /// Playback halted on an empty buffer without a hard failure.
    BufferStall,
    /// Anything the engine cannot recover in place.
    Other,
}

/// Events raised by the playback engine and its recovery supervisor.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum EngineEvent {
    /// A session finished attaching to the media element.
    SessionLoaded {
        channel: ChannelId,
        transport: StreamKind,
    },
    /// Manifest fetched and parsed; liveness and quality tiers are known.
    ManifestParsed {
        live: bool,
        levels: Vec<QualityLevel>,
    },
    /// The adaptive session switched quality tiers.
    LevelSwitched { level: i32 },
    /// An engine fault, before the recovery supervisor classifies it.
    Fault {
        kind: FaultKind,
        fatal: bool,
        details: String,
    },
    /// The supervisor scheduled a reload attempt.
    RetryScheduled { attempt: u32, delay: Duration },
    /// Recovery is exhausted or impossible; the session is torn down.
    TerminalError { message: String },
    /// Autoplay was rejected by policy; user interaction will start playback.
    PlaybackBlocked,
    /// The session detached from the media element.
    SessionClosed,
}
