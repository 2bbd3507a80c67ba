#![forbid(unsafe_code)]

use crate::{EngineEvent, HostEvent, MediaEvent};

/// Unified event for a playback session.
///
/// Hierarchical: each source has its own variant with a sub-enum.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Event {
    /// Raised by the media element binding.
    Media(MediaEvent),
    /// Raised by the playback engine and recovery supervisor.
    Engine(EngineEvent),
    /// Raised by the hosting document (fullscreen, visibility, OS media
    /// controls).
    Host(HostEvent),
}

impl From<MediaEvent> for Event {
    fn from(e: MediaEvent) -> Self {
        Self::Media(e)
    }
}

impl From<EngineEvent> for Event {
    fn from(e: EngineEvent) -> Self {
        Self::Engine(e)
    }
}

impl From<HostEvent> for Event {
    fn from(e: HostEvent) -> Self {
        Self::Host(e)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::MediaSessionAction;

    fn is_play(event: &MediaEvent) -> bool {
        matches!(event, MediaEvent::Play)
    }

    fn is_duration_change(event: &MediaEvent) -> bool {
        matches!(event, MediaEvent::DurationChange { .. })
    }

    #[rstest]
    #[case(MediaEvent::Play, is_play)]
    #[case(MediaEvent::DurationChange { duration_secs: 1.0 }, is_duration_change)]
    fn media_event_into_event(#[case] media: MediaEvent, #[case] check: fn(&MediaEvent) -> bool) {
        let event: Event = media.into();
        assert!(matches!(event, Event::Media(inner) if check(&inner)));
    }

    #[test]
    fn engine_event_into_event() {
        let event: Event = EngineEvent::PlaybackBlocked.into();
        assert!(matches!(event, Event::Engine(EngineEvent::PlaybackBlocked)));
    }

    #[test]
    fn host_event_into_event() {
        let event: Event = HostEvent::MediaAction(MediaSessionAction::Pause).into();
        assert!(matches!(
            event,
            Event::Host(HostEvent::MediaAction(MediaSessionAction::Pause))
        ));
    }
}
