#![forbid(unsafe_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering},
    Arc,
};

use kanava_core::AUTO_LEVEL;
use kanava_engine::{AdaptiveFactory, AdaptiveSession, TunedOptions};
use kanava_events::EventBus;
use kanava_platform::{MediaElement, Mutex};

/// Recording stand-in for an adaptive-streaming session.
#[derive(Debug)]
pub struct FakeAdaptiveSession {
    pub url: String,
    destroyed: AtomicBool,
    start_load_calls: AtomicUsize,
    stop_load_calls: AtomicUsize,
    recover_calls: AtomicUsize,
    level: AtomicI32,
}

impl FakeAdaptiveSession {
    fn new(url: String) -> Self {
        Self {
            url,
            destroyed: AtomicBool::new(false),
            start_load_calls: AtomicUsize::new(0),
            stop_load_calls: AtomicUsize::new(0),
            recover_calls: AtomicUsize::new(0),
            level: AtomicI32::new(AUTO_LEVEL),
        }
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn start_load_calls(&self) -> usize {
        self.start_load_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn stop_load_calls(&self) -> usize {
        self.stop_load_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn recover_calls(&self) -> usize {
        self.recover_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn current_level(&self) -> i32 {
        self.level.load(Ordering::SeqCst)
    }
}

/// Local wrapper so `AdaptiveSession` (defined in `kanava-engine`) can be
/// implemented for a shared `FakeAdaptiveSession` handle; the orphan rules
/// forbid implementing a foreign trait directly for `Arc<FakeAdaptiveSession>`
/// since `Arc` is not a fundamental type.
struct SessionHandle(Arc<FakeAdaptiveSession>);

impl AdaptiveSession for SessionHandle {
    fn start_load(&self) {
        self.0.start_load_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_load(&self) {
        self.0.stop_load_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn recover_media_error(&self) {
        self.0.recover_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn set_current_level(&self, level: i32) {
        self.0.level.store(level, Ordering::SeqCst);
    }

    fn current_level(&self) -> i32 {
        self.0.level.load(Ordering::SeqCst)
    }

    fn destroy(&self) {
        self.0.destroyed.store(true, Ordering::SeqCst);
    }
}

/// Factory recording every session it creates.
///
/// `live_sessions()` is the resource-leak check: after any sequence of
/// loads and unloads at most one undestroyed session may remain.
#[derive(Default)]
pub struct FakeAdaptiveFactory {
    supported: AtomicBool,
    created: Mutex<Vec<Arc<FakeAdaptiveSession>>>,
}

impl FakeAdaptiveFactory {
    #[must_use]
    pub fn new() -> Self {
        let factory = Self::default();
        factory.supported.store(true, Ordering::SeqCst);
        factory
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    #[must_use]
    pub fn created(&self) -> Vec<Arc<FakeAdaptiveSession>> {
        self.created.lock().clone()
    }

    /// Sessions created and not yet destroyed.
    #[must_use]
    pub fn live_sessions(&self) -> usize {
        self.created
            .lock()
            .iter()
            .filter(|s| !s.is_destroyed())
            .count()
    }
}

impl AdaptiveFactory for FakeAdaptiveFactory {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    fn create(
        &self,
        url: &str,
        _options: &TunedOptions,
        _element: Arc<dyn MediaElement>,
        _bus: EventBus,
    ) -> Box<dyn AdaptiveSession> {
        let session = Arc::new(FakeAdaptiveSession::new(url.to_owned()));
        self.created.lock().push(Arc::clone(&session));
        Box::new(SessionHandle(session))
    }
}
