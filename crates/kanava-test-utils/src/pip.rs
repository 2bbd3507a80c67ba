#![forbid(unsafe_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use kanava_events::{EventBus, MediaEvent};
use kanava_platform::{Mutex, PipHost, PlatformError, PlatformResult};

/// In-memory Picture-in-Picture host.
///
/// Construct hosts for several elements with [`FakePipHost::sharing`] to
/// model the system-wide single-target rule.
pub struct FakePipHost {
    supported: AtomicBool,
    active: AtomicBool,
    system_active: Arc<AtomicBool>,
    deny_next: AtomicBool,
    bus: Mutex<Option<EventBus>>,
}

impl Default for FakePipHost {
    fn default() -> Self {
        Self {
            supported: AtomicBool::new(true),
            active: AtomicBool::new(false),
            system_active: Arc::new(AtomicBool::new(false)),
            deny_next: AtomicBool::new(false),
            bus: Mutex::new(None),
        }
    }
}

impl FakePipHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A host for another element sharing this host's system-wide flag.
    #[must_use]
    pub fn sharing(&self) -> Self {
        Self {
            supported: AtomicBool::new(self.supported.load(Ordering::SeqCst)),
            active: AtomicBool::new(false),
            system_active: Arc::clone(&self.system_active),
            deny_next: AtomicBool::new(false),
            bus: Mutex::new(None),
        }
    }

    pub fn attach_bus(&self, bus: EventBus) {
        *self.bus.lock() = Some(bus);
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    /// Make the next request fail as a policy denial.
    pub fn deny_next_request(&self) {
        self.deny_next.store(true, Ordering::SeqCst);
    }

    /// Simulate the user closing the PiP window from the platform side.
    pub fn simulate_leave(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.system_active.store(false, Ordering::SeqCst);
        self.publish(MediaEvent::LeftPictureInPicture);
    }

    fn publish(&self, event: MediaEvent) {
        if let Some(bus) = self.bus.lock().as_ref() {
            bus.publish(event);
        }
    }
}

#[async_trait]
impl PipHost for FakePipHost {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    fn is_active_target(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn has_active_target(&self) -> bool {
        self.system_active.load(Ordering::SeqCst)
    }

    async fn request(&self) -> PlatformResult<()> {
        if !self.is_supported() {
            return Err(PlatformError::Unsupported);
        }
        if self.deny_next.swap(false, Ordering::SeqCst) {
            return Err(PlatformError::Denied);
        }
        self.active.store(true, Ordering::SeqCst);
        self.system_active.store(true, Ordering::SeqCst);
        self.publish(MediaEvent::EnteredPictureInPicture);
        Ok(())
    }

    async fn exit(&self) -> PlatformResult<()> {
        if self.system_active.swap(false, Ordering::SeqCst) {
            let was_target = self.active.swap(false, Ordering::SeqCst);
            if was_target {
                self.publish(MediaEvent::LeftPictureInPicture);
            }
        }
        Ok(())
    }
}
