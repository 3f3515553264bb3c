//! Reload coordination for schema mutations.
//!
//! Every structural mutation must restart the platform's runtime wiring so
//! generated models and routes match the new schema, but the restart is
//! driven by a filesystem watcher that would otherwise fire mid-mutation.
//! `ReloadCoordinator` is the process-wide gate around that machinery: it
//! suppresses the watcher for the duration of a mutation and schedules
//! exactly one deferred reload once the mutation has committed, after the
//! response to the caller has gone out.

use std::sync::{Arc, Mutex};

use log::{error, info};

/// Restarts the application's runtime wiring from the current registry
/// state. The reload machinery itself lives outside this crate; the
/// coordinator only decides when it runs.
pub trait ReloadTrigger: Send + Sync {
    fn reload(&self);
}

/// A trigger that only logs. Stands in where no real reload machinery is
/// wired up, e.g. in the standalone server binary.
pub struct LoggingReloadTrigger;

impl ReloadTrigger for LoggingReloadTrigger {
    fn reload(&self) {
        info!("reload requested");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    /// No mutation in flight; the watcher is live.
    Idle,
    /// A mutation is in flight; watcher events are ignored.
    Suppressed,
    /// A mutation committed; a deferred reload is scheduled but has not run.
    ReloadOwed,
}

struct CoordinatorInner {
    state: Mutex<ReloadState>,
    trigger: Arc<dyn ReloadTrigger>,
}

/// Process-wide reload gate.
///
/// The suppression flag is a boolean guard, not a counter: callers are
/// responsible for not issuing overlapping structural mutations. If two
/// mutations do overlap, the second `begin_mutation` is a no-op and the
/// first `end_mutation` re-exposes the watcher before the second mutation
/// finishes. This mirrors the behavior external callers already depend on.
pub struct ReloadCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl ReloadCoordinator {
    pub fn new(trigger: Arc<dyn ReloadTrigger>) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                state: Mutex::new(ReloadState::Idle),
                trigger,
            }),
        }
    }

    pub fn state(&self) -> ReloadState {
        self.inner.state()
    }

    /// Consulted by the external filesystem watcher: only `Idle` watches.
    pub fn is_watching(&self) -> bool {
        self.state() == ReloadState::Idle
    }

    /// Suppress the watcher for the duration of a mutation. Idempotent while
    /// already suppressed.
    pub fn begin_mutation(&self) {
        self.inner.set_state(ReloadState::Suppressed);
    }

    /// Release suppression after a failed mutation without scheduling a
    /// reload. Suppression must never outlive a failed mutation.
    pub fn abort_mutation(&self) {
        self.inner.set_state(ReloadState::Idle);
    }

    /// Record that a reload is owed and schedule it to run after the current
    /// unit of work yields, so the caller's response is not delayed.
    pub fn end_mutation(&self) {
        {
            let mut state = match self.inner.state.lock() {
                Ok(state) => state,
                Err(_) => {
                    error!("reload coordinator state lock poisoned");
                    return;
                }
            };
            if *state == ReloadState::ReloadOwed {
                // A reload is already scheduled for this batch.
                return;
            }
            *state = ReloadState::ReloadOwed;
        }

        let inner = Arc::clone(&self.inner);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    inner.run_owed_reload();
                });
            }
            Err(_) => {
                // No runtime available: run the reload inline.
                inner.run_owed_reload();
            }
        }
    }
}

impl CoordinatorInner {
    fn state(&self) -> ReloadState {
        match self.state.lock() {
            Ok(state) => *state,
            Err(_) => {
                error!("reload coordinator state lock poisoned");
                ReloadState::Idle
            }
        }
    }

    fn set_state(&self, next: ReloadState) {
        match self.state.lock() {
            Ok(mut state) => *state = next,
            Err(_) => error!("reload coordinator state lock poisoned"),
        }
    }

    fn run_owed_reload(&self) {
        if self.state() != ReloadState::ReloadOwed {
            // A new mutation took over; its own end_mutation reschedules.
            return;
        }
        self.trigger.reload();
        self.set_state(ReloadState::Idle);
    }
}
