#![forbid(unsafe_code)]

use std::{fmt, sync::Arc};

/// Stable catalog identifier for a channel.
///
/// Ids are unique across the catalog and never change for its lifetime, so
/// they are safe to use as navigation targets and persistence keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(Arc<str>);

impl ChannelId {
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Transport a channel's stream reference resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Adaptive HTTP Live Streaming playlist.
    Hls,
    /// Progressive MP4 file.
    Mp4,
    /// Opaque embedded third-party player.
    Iframe,
}

/// Catalog category labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelCategory {
    News,
    Entertainment,
    Kids,
    Music,
    Infotainment,
    Sports,
    Movies,
    Devotional,
    Educational,
    Lifestyle,
    Other,
}

impl ChannelCategory {
    /// URL-safe slug used in navigation list contexts.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Entertainment => "entertainment",
            Self::Kids => "kids",
            Self::Music => "music",
            Self::Infotainment => "infotainment",
            Self::Sports => "sports",
            Self::Movies => "movies",
            Self::Devotional => "devotional",
            Self::Educational => "educational",
            Self::Lifestyle => "lifestyle",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ChannelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::News => "News",
            Self::Entertainment => "Entertainment",
            Self::Kids => "Kids",
            Self::Music => "Music",
            Self::Infotainment => "Infotainment",
            Self::Sports => "Sports",
            Self::Movies => "Movies",
            Self::Devotional => "Devotional",
            Self::Educational => "Educational",
            Self::Lifestyle => "Lifestyle",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

/// One channel record as the catalog stores it.
///
/// `stream_url` is opaque at this level: it may be a plain URL or a
/// base64-obfuscated one. [`crate::resolve`] decides.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub category: ChannelCategory,
    pub language: String,
    pub logo_url: String,
    pub thumbnail_url: String,
    pub stream_url: String,
    pub kind: StreamKind,
    /// Optional host-driven periodic reload interval, carried through from
    /// catalog data. The player core does not act on it.
    pub auto_reload_minutes: Option<u32>,
}

impl Channel {
    /// Minimal constructor for the fields every channel has.
    #[must_use]
    pub fn new(
        id: impl Into<ChannelId>,
        name: impl Into<String>,
        category: ChannelCategory,
        stream_url: impl Into<String>,
        kind: StreamKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            language: String::new(),
            logo_url: String::new(),
            thumbnail_url: String::new(),
            stream_url: stream_url.into(),
            kind,
            auto_reload_minutes: None,
        }
    }

    #[must_use]
    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = url.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl From<ChannelId> for Arc<str> {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}
