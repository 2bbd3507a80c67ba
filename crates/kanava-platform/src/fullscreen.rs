#![forbid(unsafe_code)]

use async_trait::async_trait;

use crate::error::PlatformResult;

/// The surface (player container) fullscreen is requested on.
///
/// Implementations publish [`kanava_events::HostEvent::FullscreenChanged`]
/// whenever the document's fullscreen state changes, including exits the
/// player did not initiate (system back gesture, escape key).
#[async_trait]
pub trait FullscreenSurface: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    fn is_fullscreen(&self) -> bool;

    async fn request_fullscreen(&self) -> PlatformResult<()>;

    async fn exit_fullscreen(&self) -> PlatformResult<()>;
}

/// Screen orientation lock.
///
/// Locking is best-effort everywhere it is used: not every platform allows
/// it, and some only honor it while fullscreen.
#[async_trait]
pub trait OrientationLock: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    async fn lock_landscape(&self) -> PlatformResult<()>;

    fn unlock(&self);
}
