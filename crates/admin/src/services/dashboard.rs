//! In-memory dashboard state.
//!
//! The dashboard holds one immutable [`DashboardSnapshot`] at a time. Readers
//! clone the `Arc`; writers build a new snapshot and swap it in. A single
//! busy flag serializes status transitions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use krixo_core::reducer::pending_count;
use krixo_core::{ServiceOrder, WorkerApplication};
use tracing::{info, instrument, warn};

use super::loader::{LoadOutcome, load_commands, load_workers};
use super::notices::{Notice, messages};
use crate::backend::{AdminBackend, ListingRoute};
use crate::error::AppError;

/// Everything the dashboard page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub commands: Vec<ServiceOrder>,
    pub workers: Vec<WorkerApplication>,
    /// Set when the last command load failed with no fallback.
    pub backend_error: Option<String>,
    /// Commands were served through a separately configured API URL.
    pub via_proxy: bool,
    /// Commands are the built-in sample set.
    pub sample_data: bool,
    /// At least one refresh has completed.
    pub loaded: bool,
}

impl DashboardSnapshot {
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        pending_count(&self.commands)
    }

    #[must_use]
    pub fn pending_workers(&self) -> usize {
        pending_count(&self.workers)
    }
}

/// Shared dashboard state.
#[derive(Debug, Default)]
pub struct Dashboard {
    snapshot: RwLock<Arc<DashboardSnapshot>>,
    busy: AtomicBool,
}

/// Marks a transition in flight; clears the busy flag on drop.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard seeded with `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: DashboardSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            busy: AtomicBool::new(false),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the snapshot wholesale.
    pub fn replace(&self, next: DashboardSnapshot) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
    }

    /// Derive the next snapshot from the current one and swap it in.
    pub fn update(&self, f: impl FnOnce(&DashboardSnapshot) -> DashboardSnapshot) {
        let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let next = f(&slot);
        *slot = Arc::new(next);
    }

    /// Claim the busy flag for one transition.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Busy`] if a transition is already in flight.
    pub fn try_begin(&self) -> Result<BusyGuard<'_>, AppError> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| BusyGuard { flag: &self.busy })
            .map_err(|_| AppError::Busy)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Reload both collections and swap in the result.
    ///
    /// A fatal command load keeps the previous records but sets
    /// `backend_error`, which switches the page to the connection error
    /// panel until the next successful refresh.
    ///
    /// Holds the busy flag for the whole reload so a transition finishing
    /// mid-fetch cannot be overwritten by stale listings. While a transition
    /// runs, the reload is skipped with a busy notice.
    #[instrument(skip(self, backend))]
    pub async fn refresh<B: AdminBackend>(
        &self,
        backend: &B,
        worker_listing: bool,
        proxy_configured: bool,
    ) -> Vec<Notice> {
        let Ok(_guard) = self.try_begin() else {
            warn!("Refresh skipped, a transition is in flight");
            return vec![Notice::warning(messages::BUSY)];
        };

        let commands = load_commands(backend).await;
        let workers = load_workers(backend, worker_listing).await;

        let mut notices = Vec::new();
        let previous = self.snapshot();
        let mut next = DashboardSnapshot {
            loaded: true,
            ..DashboardSnapshot::default()
        };

        match commands {
            LoadOutcome::Live { records, route } => {
                next.via_proxy = proxy_configured && route == ListingRoute::Primary;
                next.commands = records;
            }
            LoadOutcome::Degraded { records, reason } => {
                warn!(%reason, "Showing sample commands");
                next.sample_data = true;
                next.commands = records;
                notices.push(Notice::warning(messages::SAMPLE_DATA));
            }
            LoadOutcome::Fatal(err) => {
                let reason = err.reason();
                let shown = if reason.trim().is_empty() {
                    messages::UNEXPECTED.to_owned()
                } else {
                    reason
                };
                notices.push(Notice::error(format!(
                    "{}{shown}",
                    messages::LOAD_FAILED_PREFIX
                )));
                next.commands.clone_from(&previous.commands);
                next.backend_error = Some(shown);
            }
        }

        match workers {
            LoadOutcome::Live { records, .. } => next.workers = records,
            LoadOutcome::Degraded { reason, .. } => {
                warn!(%reason, "Worker tab left empty");
                notices.push(Notice::warning(messages::WORKERS_LOAD_FAILED));
            }
            LoadOutcome::Fatal(_) => {}
        }

        info!(
            commands = next.commands.len(),
            workers = next.workers.len(),
            backend_error = next.backend_error.is_some(),
            "Dashboard refreshed"
        );
        self.replace(next);
        notices
    }
}
