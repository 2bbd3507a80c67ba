#![forbid(unsafe_code)]

use async_trait::async_trait;

use crate::error::PlatformResult;

/// Screen wake lock.
///
/// The platform releases held locks on its own when the tab is hidden;
/// callers re-acquire on visibility, which is why [`acquire`] must be
/// idempotent while a lock is already held.
///
/// [`acquire`]: WakeLock::acquire
#[async_trait]
pub trait WakeLock: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    fn is_held(&self) -> bool;

    async fn acquire(&self) -> PlatformResult<()>;

    /// Release the lock if held. Safe to call unconditionally.
    async fn release(&self);
}
