#![forbid(unsafe_code)]

use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
use unimock::unimock;

use crate::channel::Channel;

/// Read-only channel catalog.
///
/// Both accessors are synchronous and side-effect-free; the catalog is
/// constant data for the lifetime of the process. Filtering preserves
/// catalog order and never re-sorts.
#[cfg_attr(any(test, feature = "test-utils"), unimock(api = ChannelDirectoryMock))]
pub trait ChannelDirectory: Send + Sync + 'static {
    /// Look up a channel by its stable id.
    fn channel_by_id(&self, id: &str) -> Option<Channel>;

    /// All channels in catalog order, optionally filtered by category slug.
    fn channels(&self, category: Option<&str>) -> Vec<Channel>;
}

/// Directory backed by an in-memory channel list.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    channels: Arc<[Channel]>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new(channels: Vec<Channel>) -> Self {
        Self {
            channels: channels.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelDirectory for InMemoryDirectory {
    fn channel_by_id(&self, id: &str) -> Option<Channel> {
        self.channels.iter().find(|c| c.id.as_str() == id).cloned()
    }

    fn channels(&self, category: Option<&str>) -> Vec<Channel> {
        match category {
            Some(slug) => self
                .channels
                .iter()
                .filter(|c| c.category.slug() == slug)
                .cloned()
                .collect(),
            None => self.channels.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelCategory, StreamKind};

    fn catalog() -> InMemoryDirectory {
        InMemoryDirectory::new(vec![
            Channel::new("a", "A", ChannelCategory::News, "u", StreamKind::Hls),
            Channel::new("b", "B", ChannelCategory::Sports, "u", StreamKind::Mp4),
            Channel::new("c", "C", ChannelCategory::News, "u", StreamKind::Hls),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let dir = catalog();
        assert_eq!(dir.channel_by_id("b").unwrap().name, "B");
        assert!(dir.channel_by_id("missing").is_none());
    }

    #[test]
    fn category_filter_preserves_catalog_order() {
        let dir = catalog();
        let news: Vec<_> = dir
            .channels(Some("news"))
            .into_iter()
            .map(|c| c.id.as_str().to_owned())
            .collect();
        assert_eq!(news, ["a", "c"]);
    }

    #[test]
    fn unfiltered_returns_full_catalog() {
        let dir = catalog();
        assert_eq!(dir.channels(None).len(), 3);
    }
}
