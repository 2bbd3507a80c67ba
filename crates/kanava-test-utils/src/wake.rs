#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use kanava_platform::{PlatformError, PlatformResult, WakeLock};

/// In-memory wake lock.
pub struct FakeWakeLock {
    supported: AtomicBool,
    held: AtomicBool,
    deny_next: AtomicBool,
    acquire_calls: AtomicUsize,
}

impl Default for FakeWakeLock {
    fn default() -> Self {
        Self {
            supported: AtomicBool::new(true),
            held: AtomicBool::new(false),
            deny_next: AtomicBool::new(false),
            acquire_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeWakeLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    pub fn deny_next_acquire(&self) {
        self.deny_next.store(true, Ordering::SeqCst);
    }

    /// Simulate the platform dropping the lock on tab hide.
    pub fn simulate_platform_release(&self) {
        self.held.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn acquire_calls(&self) -> usize {
        self.acquire_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WakeLock for FakeWakeLock {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    async fn acquire(&self) -> PlatformResult<()> {
        self.acquire_calls.fetch_add(1, Ordering::SeqCst);
        if !self.is_supported() {
            return Err(PlatformError::Unsupported);
        }
        if self.deny_next.swap(false, Ordering::SeqCst) {
            return Err(PlatformError::Denied);
        }
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
    }
}
