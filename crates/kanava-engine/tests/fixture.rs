#![forbid(unsafe_code)]

//! Shared rig for engine integration tests.

use std::sync::Arc;

use kanava_engine::{PlaybackEngine, RecoveryPolicy, TunedOptions};
use kanava_events::{Event, EventBus};
use kanava_test_utils::{FakeAdaptiveFactory, FakeMediaElement, FakePipHost};
use tokio::sync::broadcast::{self, error::TryRecvError};

pub struct Rig {
    pub bus: EventBus,
    pub element: Arc<FakeMediaElement>,
    pub factory: Arc<FakeAdaptiveFactory>,
    pub pip: Arc<FakePipHost>,
    pub engine: Arc<PlaybackEngine>,
}

pub fn rig() -> Rig {
    let bus = EventBus::new(64);
    let element = Arc::new(FakeMediaElement::new());
    element.attach_bus(bus.clone());
    let factory = Arc::new(FakeAdaptiveFactory::new());
    let pip = Arc::new(FakePipHost::new());
    pip.attach_bus(bus.clone());
    let engine = PlaybackEngine::new(
        Arc::clone(&element) as _,
        Arc::clone(&factory) as _,
        Arc::clone(&pip) as _,
        bus.clone(),
        TunedOptions::default(),
        RecoveryPolicy::default(),
    );
    Rig {
        bus,
        element,
        factory,
        pip,
        engine,
    }
}

/// Let spawned tasks run without advancing virtual time.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Drain everything currently buffered on a subscription.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            Err(TryRecvError::Lagged(_)) => {}
        }
    }
    events
}
