#![forbid(unsafe_code)]

use std::time::Duration;

use kanava_events::FaultKind;

/// Reload attempts before a network failure becomes terminal.
pub const MAX_RETRIES: u32 = 5;

/// Retry budget configuration.
#[derive(Clone, Debug)]
pub struct RecoveryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RecoveryPolicy {
    /// Delay before reload attempt `attempt` (1-based): `base * 2^(attempt-1)`.
    ///
    /// The doubling is capped only by the retry-count ceiling, not by a
    /// separate max-delay clamp.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.base_delay * 2_u32.pow(attempt - 1)
    }
}

/// What the engine should do about a classified fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Schedule a full session reload after backoff.
    RetryAfter { attempt: u32, delay: Duration },
    /// Invoke the adaptive session's in-place media recovery.
    RecoverMedia,
    /// Seek to the live edge of the seekable range.
    SeekToLiveEdge,
    /// Resume segment loading without seeking.
    ResumeLoad,
    /// Unrecoverable: surface the message and destroy the session.
    Terminal { message: String },
    /// Non-fatal noise; no action.
    Ignore,
}

/// Classifies engine faults and meters the retry budget.
///
/// State is private to the supervisor: the count increments once per
/// fatal-network recovery attempt and resets to zero on every successful
/// manifest parse and on every fresh load.
#[derive(Debug)]
pub struct RecoverySupervisor {
    policy: RecoveryPolicy,
    retry_count: u32,
}

impl RecoverySupervisor {
    #[must_use]
    pub fn new(policy: RecoveryPolicy) -> Self {
        Self {
            policy,
            retry_count: 0,
        }
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// A manifest parsed successfully; the stream is healthy again.
    pub fn on_manifest_parsed(&mut self) {
        self.retry_count = 0;
    }

    /// A fresh `load()` started; past failures no longer apply.
    pub fn reset(&mut self) {
        self.retry_count = 0;
    }

    /// Classify a fault reported by the streaming layer.
    ///
    /// `live_edge_known` gates the stall path: seeking to the live edge is
    /// only meaningful when the seekable range reports one.
    pub fn on_fault(
        &mut self,
        kind: FaultKind,
        fatal: bool,
        details: &str,
        live: bool,
        live_edge_known: bool,
    ) -> RecoveryAction {
        match (kind, fatal) {
            (FaultKind::Network, true) => self.next_retry(details),
            (FaultKind::Media, true) => RecoveryAction::RecoverMedia,
            (FaultKind::BufferStall, _) => {
                if live && live_edge_known {
                    RecoveryAction::SeekToLiveEdge
                } else {
                    RecoveryAction::ResumeLoad
                }
            }
            (FaultKind::Other, true) => RecoveryAction::Terminal {
                message: format!("An unrecoverable playback error occurred: {details}"),
            },
            _ => RecoveryAction::Ignore,
        }
    }

    /// Playback sat in `waiting` past the watchdog window.
    ///
    /// Live streams jump to the live edge; VOD goes through a full reload,
    /// bounded by the same retry budget as network failures.
    pub fn on_stall_timeout(&mut self, live: bool, live_edge_known: bool) -> RecoveryAction {
        if live && live_edge_known {
            RecoveryAction::SeekToLiveEdge
        } else {
            self.next_retry("playback stalled")
        }
    }

    /// Consume one reload attempt from the budget, or go terminal.
    pub fn next_retry(&mut self, details: &str) -> RecoveryAction {
        if self.retry_count < self.policy.max_retries {
            self.retry_count += 1;
            RecoveryAction::RetryAfter {
                attempt: self.retry_count,
                delay: self.policy.delay_for_attempt(self.retry_count),
            }
        } else {
            RecoveryAction::Terminal {
                message: format!(
                    "Stream failed to load after {} attempts: {details}",
                    self.policy.max_retries
                ),
            }
        }
    }
}

impl Default for RecoverySupervisor {
    fn default() -> Self {
        Self::new(RecoveryPolicy::default())
    }
}
