#![forbid(unsafe_code)]

use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// A named, independently cancellable scheduled task.
///
/// Every timer in the player — controls auto-hide, unlock affordance,
/// retry backoff, stall watchdog — is one of these, owned by the component
/// that armed it. Dropping the handle cancels the task, so a component
/// tearing down can never leave a callback firing against a detached
/// element.
#[derive(Debug)]
pub struct ScheduledTask {
    name: &'static str,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `fut` once after `delay`, unless cancelled first.
    ///
    /// Cancellation only covers the waiting period. Once fired, the body
    /// runs to completion even if the handle is dropped — a firing retry
    /// may replace its own handle while reloading.
    pub fn once<F>(name: &'static str, delay: Duration, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    trace!(task = name, "scheduled task cancelled");
                    return;
                }
                () = crate::time::sleep(delay) => {
                    trace!(task = name, "scheduled task fired");
                }
            }
            fut.await;
        });
        Self {
            name,
            cancel,
            handle,
        }
    }

    /// Run a long-lived future until it completes or the task is cancelled.
    pub fn spawn<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    trace!(task = name, "task cancelled");
                }
                () = fut => {}
            }
        });
        Self {
            name,
            cancel,
            handle,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
