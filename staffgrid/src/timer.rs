//! Cancellable deferred callbacks.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A single-slot deferred callback.
///
/// Scheduling replaces whatever was pending, so rapid re-scheduling never
/// stacks timers. Dropping the slot cancels the pending callback.
#[derive(Debug, Default)]
pub struct Deferred {
    pending: Option<JoinHandle<()>>,
}

impl Deferred {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` after `delay`, cancelling any pending callback.
    ///
    /// Needs a tokio runtime. Without one nothing is scheduled and `false`
    /// is returned.
    pub fn schedule<F>(&mut self, delay: Duration, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let Ok(handle) = Handle::try_current() else {
            log::warn!("No async runtime, dropping deferred callback");
            return false;
        };
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
        true
    }

    /// Cancels the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Returns `true` if a callback is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        self.cancel();
    }
}
