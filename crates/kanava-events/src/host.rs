#![forbid(unsafe_code)]

/// OS media-control action delivered through the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum MediaSessionAction {
    Play,
    Pause,
    NextTrack,
    PreviousTrack,
    SeekForward { offset_secs: Option<f64> },
    SeekBackward { offset_secs: Option<f64> },
}

/// Action kinds for registering which OS controls are live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaActionKind {
    Play,
    Pause,
    NextTrack,
    PreviousTrack,
    SeekForward,
    SeekBackward,
}

impl MediaSessionAction {
    #[must_use]
    pub fn kind(&self) -> MediaActionKind {
        match self {
            Self::Play => MediaActionKind::Play,
            Self::Pause => MediaActionKind::Pause,
            Self::NextTrack => MediaActionKind::NextTrack,
            Self::PreviousTrack => MediaActionKind::PreviousTrack,
            Self::SeekForward { .. } => MediaActionKind::SeekForward,
            Self::SeekBackward { .. } => MediaActionKind::SeekBackward,
        }
    }
}

/// Events raised by the hosting document rather than the media element.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum HostEvent {
    /// Fullscreen state changed, by any means (API call, system gesture).
    FullscreenChanged { fullscreen: bool },
    /// The tab became visible or hidden.
    VisibilityChanged { visible: bool },
    /// The user pressed an OS-level media control.
    MediaAction(MediaSessionAction),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_strips_payload() {
        let action = MediaSessionAction::SeekForward {
            offset_secs: Some(30.0),
        };
        assert_eq!(action.kind(), MediaActionKind::SeekForward);
    }
}
