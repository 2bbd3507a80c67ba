#![forbid(unsafe_code)]

/// Events raised by the media element binding.
///
/// These mirror what the element reports about itself; nothing here is
/// derived. Position and duration are in seconds, with `f64::INFINITY`
/// duration for live streams.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum MediaEvent {
    Play,
    Pause,
    TimeUpdate { position_secs: f64 },
    DurationChange { duration_secs: f64 },
    /// Playback halted waiting for buffered data.
    Waiting,
    /// Playback resumed after a start or a stall.
    Playing,
    Ended,
    EnteredPictureInPicture,
    LeftPictureInPicture,
}
