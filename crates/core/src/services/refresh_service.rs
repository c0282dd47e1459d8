use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Re-runs a refresh task at a fixed interval on the tokio runtime.
///
/// The first run happens immediately. A run that overruns the interval
/// delays the next tick instead of bursting to catch up. Nothing is retried:
/// whatever the task does with failures (e.g., falling back to static data)
/// is its own business.
pub struct RefreshService;

impl RefreshService {
    /// Spawn the polling loop. Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(interval: Duration, mut task: F) -> RefreshHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Refresh tick");
                task().await;
            }
        });
        RefreshHandle {
            handle: Some(handle),
        }
    }
}

/// Owner of a running refresh loop. Stopping or dropping it cancels the loop;
/// a run in progress is abandoned at its next suspension point.
#[must_use = "dropping the handle stops the refresh loop"]
pub struct RefreshHandle {
    handle: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Cancel the loop. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Refresh loop stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
