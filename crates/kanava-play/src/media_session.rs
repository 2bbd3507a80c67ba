use std::sync::Arc;

use kanava_core::Channel;
use kanava_events::{Event, MediaActionKind, MediaEvent};
use kanava_platform::{Artwork, MediaSessionSurface, NowPlaying, PlaybackState};

/// Artwork renditions offered to the OS, smallest first.
const ARTWORK_SIZES: [&str; 6] = ["96x96", "128x128", "192x192", "256x256", "384x384", "512x512"];

/// Publishes now-playing state to the OS media session.
///
/// Incoming control presses arrive on the bus as
/// [`kanava_events::HostEvent::MediaAction`]; the watch session dispatches
/// them. This bridge only writes.
pub struct MediaSessionBridge {
    surface: Arc<dyn MediaSessionSurface>,
}

impl MediaSessionBridge {
    #[must_use]
    pub fn new(surface: Arc<dyn MediaSessionSurface>) -> Self {
        Self { surface }
    }

    /// Publish metadata for the channel being watched.
    pub fn publish_channel(&self, channel: &Channel) {
        if !self.surface.is_supported() {
            return;
        }
        let artwork = ARTWORK_SIZES
            .iter()
            .map(|sizes| Artwork {
                src: channel.logo_url.clone(),
                sizes: (*sizes).to_owned(),
            })
            .collect();
        self.surface.set_metadata(Some(NowPlaying {
            title: channel.name.clone(),
            artist: channel.category.to_string(),
            artwork,
        }));
    }

    /// Register which OS controls are live.
    ///
    /// Seek handlers are only registered for non-live content: a live
    /// stream offers no meaningful OS seek target.
    pub fn update_actions(&self, live: bool) {
        if !self.surface.is_supported() {
            return;
        }
        let mut actions = vec![
            MediaActionKind::Play,
            MediaActionKind::Pause,
            MediaActionKind::NextTrack,
            MediaActionKind::PreviousTrack,
        ];
        if !live {
            actions.push(MediaActionKind::SeekForward);
            actions.push(MediaActionKind::SeekBackward);
        }
        self.surface.set_enabled_actions(actions);
    }

    /// Mirror element play/pause into the OS playback state.
    pub fn on_event(&self, event: &Event) {
        if !self.surface.is_supported() {
            return;
        }
        match event {
            Event::Media(MediaEvent::Play | MediaEvent::Playing) => {
                self.surface.set_playback_state(PlaybackState::Playing);
            }
            Event::Media(MediaEvent::Pause | MediaEvent::Ended) => {
                self.surface.set_playback_state(PlaybackState::Paused);
            }
            _ => {}
        }
    }

    /// Clear everything so no stale OS control references a dead session.
    pub fn clear(&self) {
        self.surface.set_metadata(None);
        self.surface.set_playback_state(PlaybackState::None);
        self.surface.set_enabled_actions(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use kanava_core::{ChannelCategory, StreamKind};
    use kanava_test_utils::RecordingMediaSession;

    use super::*;

    fn bridge() -> (MediaSessionBridge, Arc<RecordingMediaSession>) {
        let surface = Arc::new(RecordingMediaSession::new());
        let bridge = MediaSessionBridge::new(Arc::clone(&surface) as _);
        (bridge, surface)
    }

    #[test]
    fn metadata_carries_name_category_and_artwork_ladder() {
        let (bridge, surface) = bridge();
        let channel = Channel::new(
            "alpha",
            "Alpha News",
            ChannelCategory::News,
            "https://example.com/master.m3u8",
            StreamKind::Hls,
        )
        .with_logo_url("https://example.com/logo.png");

        bridge.publish_channel(&channel);

        let metadata = surface.metadata().unwrap();
        assert_eq!(metadata.title, "Alpha News");
        assert_eq!(metadata.artist, "News");
        assert_eq!(metadata.artwork.len(), 6);
        assert_eq!(metadata.artwork[0].sizes, "96x96");
        assert!(metadata
            .artwork
            .iter()
            .all(|a| a.src == "https://example.com/logo.png"));
    }

    #[test]
    fn seek_actions_are_registered_only_for_vod() {
        let (bridge, surface) = bridge();
        bridge.update_actions(false);
        assert!(surface
            .enabled_actions()
            .contains(&MediaActionKind::SeekForward));

        bridge.update_actions(true);
        let actions = surface.enabled_actions();
        assert!(!actions.contains(&MediaActionKind::SeekForward));
        assert!(!actions.contains(&MediaActionKind::SeekBackward));
        assert!(actions.contains(&MediaActionKind::NextTrack));
    }

    #[test]
    fn playback_state_mirrors_element_events() {
        let (bridge, surface) = bridge();
        bridge.on_event(&Event::Media(MediaEvent::Play));
        assert_eq!(surface.playback_state(), PlaybackState::Playing);

        bridge.on_event(&Event::Media(MediaEvent::Pause));
        assert_eq!(surface.playback_state(), PlaybackState::Paused);
    }

    #[test]
    fn clear_removes_all_os_state() {
        let (bridge, surface) = bridge();
        bridge.update_actions(false);
        bridge.on_event(&Event::Media(MediaEvent::Play));
        bridge.clear();

        assert!(surface.metadata().is_none());
        assert_eq!(surface.playback_state(), PlaybackState::None);
        assert!(surface.enabled_actions().is_empty());
    }
}
