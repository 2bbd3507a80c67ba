//! Platform-aware async time.
//!
//! Native targets delegate to [`tokio::time::sleep`], which also honors
//! `tokio::time::pause()` in tests. On wasm32 the browser owns scheduling
//! and timer futures come from the host adapter, so `sleep` resolves
//! immediately there.

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::time::sleep;

#[cfg(target_arch = "wasm32")]
pub async fn sleep(_duration: std::time::Duration) {}
