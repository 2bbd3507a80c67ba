#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use kanava_events::{EventBus, HostEvent};
use kanava_platform::{FullscreenSurface, Mutex, OrientationLock, PlatformResult};

/// In-memory fullscreen surface publishing document-style change events.
#[derive(Default)]
pub struct FakeFullscreenSurface {
    fullscreen: AtomicBool,
    bus: Mutex<Option<EventBus>>,
}

impl FakeFullscreenSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_bus(&self, bus: EventBus) {
        *self.bus.lock() = Some(bus);
    }

    /// Simulate an exit the player did not initiate (system back gesture).
    pub fn simulate_external_exit(&self) {
        self.fullscreen.store(false, Ordering::SeqCst);
        self.publish(false);
    }

    fn publish(&self, fullscreen: bool) {
        if let Some(bus) = self.bus.lock().as_ref() {
            bus.publish(HostEvent::FullscreenChanged { fullscreen });
        }
    }
}

#[async_trait]
impl FullscreenSurface for FakeFullscreenSurface {
    fn is_supported(&self) -> bool {
        true
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.load(Ordering::SeqCst)
    }

    async fn request_fullscreen(&self) -> PlatformResult<()> {
        self.fullscreen.store(true, Ordering::SeqCst);
        self.publish(true);
        Ok(())
    }

    async fn exit_fullscreen(&self) -> PlatformResult<()> {
        self.fullscreen.store(false, Ordering::SeqCst);
        self.publish(false);
        Ok(())
    }
}

/// In-memory orientation lock.
#[derive(Default)]
pub struct FakeOrientationLock {
    locked: AtomicBool,
    supported: AtomicBool,
}

impl FakeOrientationLock {
    #[must_use]
    pub fn new() -> Self {
        let lock = Self::default();
        lock.supported.store(true, Ordering::SeqCst);
        lock
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrientationLock for FakeOrientationLock {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    async fn lock_landscape(&self) -> PlatformResult<()> {
        self.locked.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn unlock(&self) {
        self.locked.store(false, Ordering::SeqCst);
    }
}
