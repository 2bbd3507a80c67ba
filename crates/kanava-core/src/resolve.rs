#![forbid(unsafe_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::channel::StreamKind;

/// A stream reference resolved to something the player can load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    pub url: String,
    pub transport: StreamKind,
}

/// Decode a channel's stored stream reference into a playable URL.
///
/// References may be base64-obfuscated. A reference that decodes to UTF-8
/// text starting with `http` is used decoded; anything else (invalid
/// base64, binary payload, decoded text that is not a URL) falls back to
/// the reference verbatim. Not all stored references are encoded, so a
/// failed decode is the normal path, never an error.
///
/// Pure function: no I/O, never panics.
#[must_use]
pub fn resolve(stream_ref: &str, declared: StreamKind) -> ResolvedSource {
    ResolvedSource {
        url: decode_obfuscated(stream_ref),
        transport: declared,
    }
}

fn decode_obfuscated(stream_ref: &str) -> String {
    if let Ok(bytes) = STANDARD.decode(stream_ref) {
        if let Ok(text) = String::from_utf8(bytes) {
            if text.starts_with("http") {
                return text;
            }
        }
    }
    stream_ref.to_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    // "https://example.com/live.m3u8" base64-encoded.
    const ENCODED: &str = "aHR0cHM6Ly9leGFtcGxlLmNvbS9saXZlLm0zdTg=";

    #[test]
    fn encoded_reference_is_decoded() {
        let resolved = resolve(ENCODED, StreamKind::Iframe);
        assert_eq!(resolved.url, "https://example.com/live.m3u8");
        assert_eq!(resolved.transport, StreamKind::Iframe);
    }

    #[rstest]
    #[case("https://example.com/master.m3u8")] // plain URL, ':' is not base64
    #[case("not base64 at all!!")]
    #[case("aGVsbG8gd29ybGQ=")] // decodes to "hello world", not a URL
    fn unencoded_references_pass_through_verbatim(#[case] stream_ref: &str) {
        let resolved = resolve(stream_ref, StreamKind::Hls);
        assert_eq!(resolved.url, stream_ref);
    }

    #[test]
    fn binary_decode_falls_back_to_verbatim() {
        // Valid base64 of bytes that are not UTF-8.
        let stream_ref = STANDARD.encode([0xff, 0xfe, 0x00, 0x80]);
        let resolved = resolve(&stream_ref, StreamKind::Mp4);
        assert_eq!(resolved.url, stream_ref);
    }

    #[test]
    fn declared_transport_is_carried_through() {
        assert_eq!(
            resolve("x", StreamKind::Mp4).transport,
            StreamKind::Mp4
        );
    }
}
