#![forbid(unsafe_code)]

use std::time::Duration;

/// Live-tuned configuration for adaptive-streaming sessions.
///
/// Defaults favor live TV: a short live-sync window so channel switches
/// land near the live edge, a bounded back-buffer, and bounded load
/// timeouts/retries so the engine's own recovery supervisor — not the
/// streaming layer — decides when a stream is dead.
#[derive(Clone, Debug)]
pub struct TunedOptions {
    /// Segments kept between the playhead and the live edge.
    pub live_sync_segments: u32,
    /// Report live streams with an infinite duration.
    pub live_duration_infinity: bool,
    /// Upper bound on forward buffer.
    pub max_buffer: Duration,
    /// Upper bound on retained back-buffer.
    pub back_buffer: Duration,
    pub manifest_timeout: Duration,
    pub manifest_retries: u32,
    pub level_timeout: Duration,
    pub level_retries: u32,
    pub fragment_timeout: Duration,
    pub fragment_retries: u32,
}

impl Default for TunedOptions {
    fn default() -> Self {
        Self {
            live_sync_segments: 3,
            live_duration_infinity: true,
            max_buffer: Duration::from_secs(30),
            back_buffer: Duration::from_secs(90),
            manifest_timeout: Duration::from_secs(10),
            manifest_retries: 2,
            level_timeout: Duration::from_secs(10),
            level_retries: 4,
            fragment_timeout: Duration::from_secs(20),
            fragment_retries: 4,
        }
    }
}

impl TunedOptions {
    #[must_use]
    pub fn with_live_sync_segments(mut self, segments: u32) -> Self {
        self.live_sync_segments = segments;
        self
    }

    #[must_use]
    pub fn with_max_buffer(mut self, max_buffer: Duration) -> Self {
        self.max_buffer = max_buffer;
        self
    }

    #[must_use]
    pub fn with_back_buffer(mut self, back_buffer: Duration) -> Self {
        self.back_buffer = back_buffer;
        self
    }

    #[must_use]
    pub fn with_manifest_timeout(mut self, timeout: Duration) -> Self {
        self.manifest_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_fragment_timeout(mut self, timeout: Duration) -> Self {
        self.fragment_timeout = timeout;
        self
    }
}
