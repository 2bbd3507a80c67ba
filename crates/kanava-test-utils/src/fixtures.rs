#![forbid(unsafe_code)]

use kanava_core::{Channel, ChannelCategory, StreamKind};

/// A small catalog covering the transports and two categories.
#[must_use]
pub fn test_catalog() -> Vec<Channel> {
    vec![
        Channel::new(
            "alpha-news",
            "Alpha News",
            ChannelCategory::News,
            "https://example.com/alpha/master.m3u8",
            StreamKind::Hls,
        )
        .with_logo_url("https://example.com/alpha/logo.png"),
        Channel::new(
            "beta-film",
            "Beta Film",
            ChannelCategory::Movies,
            "https://example.com/beta/movie.mp4",
            StreamKind::Mp4,
        ),
        Channel::new(
            "gamma-news",
            "Gamma News",
            ChannelCategory::News,
            "https://example.com/gamma/master.m3u8",
            StreamKind::Hls,
        ),
        Channel::new(
            "delta-embed",
            "Delta Embed",
            ChannelCategory::Other,
            // "https://embed.example.com/delta" base64-encoded.
            "aHR0cHM6Ly9lbWJlZC5leGFtcGxlLmNvbS9kZWx0YQ==",
            StreamKind::Iframe,
        ),
    ]
}

/// One channel with the given id and transport.
#[must_use]
pub fn test_channel(id: &str, kind: StreamKind) -> Channel {
    let url = match kind {
        StreamKind::Hls => format!("https://example.com/{id}/master.m3u8"),
        StreamKind::Mp4 => format!("https://example.com/{id}/stream.mp4"),
        StreamKind::Iframe => format!("https://embed.example.com/{id}"),
    };
    Channel::new(id, id.to_uppercase(), ChannelCategory::Other, url, kind)
}
