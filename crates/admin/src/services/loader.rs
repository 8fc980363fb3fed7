//! Bulk fetch with fallback.
//!
//! Command listing tries the primary route, then the direct route. If the
//! direct route fails with the backend's known scan defect, the built-in
//! sample orders are served instead; any other failure is fatal for the
//! dashboard. Worker listing is optional and never fatal.

use krixo_core::normalize::{normalize_commands, normalize_workers};
use krixo_core::sample::sample_commands;
use krixo_core::{ServiceOrder, WorkerApplication};
use tracing::{error, info, instrument, warn};

use crate::backend::{AdminBackend, BackendError, ListingRoute};

/// Result of loading one collection.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// Records fetched from the backend through `route`.
    Live { records: Vec<T>, route: ListingRoute },
    /// Backend failed; `records` are a fallback shown with a warning.
    Degraded { records: Vec<T>, reason: String },
    /// Backend failed with no fallback.
    Fatal(BackendError),
}

impl<T> LoadOutcome<T> {
    /// Records to display, if any.
    #[must_use]
    pub fn records(&self) -> Option<&[T]> {
        match self {
            Self::Live { records, .. } | Self::Degraded { records, .. } => Some(records),
            Self::Fatal(_) => None,
        }
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Load service orders with the primary → direct → sample fallback chain.
#[instrument(skip(backend))]
pub async fn load_commands<B: AdminBackend>(backend: &B) -> LoadOutcome<ServiceOrder> {
    let primary_err = match backend.list_commands(ListingRoute::Primary).await {
        Ok(payload) => {
            let records = normalize_commands(&payload);
            info!(count = records.len(), "Commands loaded");
            return LoadOutcome::Live {
                records,
                route: ListingRoute::Primary,
            };
        }
        Err(e) => e,
    };
    warn!(error = %primary_err, "Primary command listing failed, trying direct route");

    let direct_err = match backend.list_commands(ListingRoute::Direct).await {
        Ok(payload) => {
            let records = normalize_commands(&payload);
            info!(count = records.len(), "Commands loaded via direct route");
            return LoadOutcome::Live {
                records,
                route: ListingRoute::Direct,
            };
        }
        Err(e) => e,
    };

    if direct_err.is_scan_defect() {
        warn!(error = %direct_err, "Backend scan defect, serving sample commands");
        return LoadOutcome::Degraded {
            records: sample_commands(),
            reason: direct_err.reason(),
        };
    }

    error!(
        primary = %primary_err,
        direct = %direct_err,
        "Command listing failed on both routes"
    );
    LoadOutcome::Fatal(direct_err)
}

/// Load worker applications.
///
/// When `enabled` is false the backend is not called and the tab stays
/// empty. A failed listing degrades to an empty tab.
#[instrument(skip(backend))]
pub async fn load_workers<B: AdminBackend>(
    backend: &B,
    enabled: bool,
) -> LoadOutcome<WorkerApplication> {
    if !enabled {
        return LoadOutcome::Live {
            records: Vec::new(),
            route: ListingRoute::Direct,
        };
    }

    match backend.list_workers().await {
        Ok(payload) => {
            let records = normalize_workers(&payload);
            info!(count = records.len(), "Worker applications loaded");
            LoadOutcome::Live {
                records,
                route: ListingRoute::Direct,
            }
        }
        Err(e) => {
            warn!(error = %e, "Worker listing failed");
            LoadOutcome::Degraded {
                records: Vec::new(),
                reason: e.reason(),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::testing::FakeBackend;

    #[tokio::test]
    async fn test_primary_success() {
        let backend = FakeBackend::new()
            .with_primary(Ok(json!([{"id": "c1", "status": "approved"}])));
        let outcome = load_commands(&backend).await;

        match outcome {
            LoadOutcome::Live { records, route } => {
                assert_eq!(route, ListingRoute::Primary);
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].id.as_str(), "c1");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(backend.calls(), vec!["list_commands:primary"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_direct() {
        let backend = FakeBackend::new()
            .with_primary(Err(BackendError::Request("proxy down".to_string())))
            .with_direct(Ok(json!({"data": [{"id": "c2"}]})));

        match load_commands(&backend).await {
            LoadOutcome::Live { records, route } => {
                assert_eq!(route, ListingRoute::Direct);
                assert_eq!(records[0].id.as_str(), "c2");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            backend.calls(),
            vec!["list_commands:primary", "list_commands:direct"]
        );
    }

    #[tokio::test]
    async fn test_scan_defect_serves_sample_commands() {
        let backend = FakeBackend::new()
            .with_primary(Err(BackendError::Request("timeout".to_string())))
            .with_direct(Err(BackendError::Status {
                status: 500,
                message: Some("sql: Scan error on column index 5".to_string()),
            }));

        let outcome = load_commands(&backend).await;
        assert!(outcome.is_degraded());
        let records = outcome.records().unwrap();
        assert_eq!(records, sample_commands().as_slice());
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_other_failure_is_fatal() {
        let backend = FakeBackend::new()
            .with_primary(Err(BackendError::Request("timeout".to_string())))
            .with_direct(Err(BackendError::Request("connection refused".to_string())));

        let outcome = load_commands(&backend).await;
        assert!(outcome.is_fatal());
        assert!(outcome.records().is_none());
    }

    #[tokio::test]
    async fn test_workers_disabled_skips_backend() {
        let backend = FakeBackend::new();
        let outcome = load_workers(&backend, false).await;
        assert_eq!(outcome.records().unwrap().len(), 0);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_workers_failure_degrades_to_empty() {
        let backend =
            FakeBackend::new().with_workers(Err(BackendError::Request("not found".to_string())));
        let outcome = load_workers(&backend, true).await;
        assert!(outcome.is_degraded());
        assert!(outcome.records().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_workers_enabled_normalizes() {
        let backend = FakeBackend::new()
            .with_workers(Ok(json!([{"id": "w1", "fullname": "سارة", "isAccepted": true}])));
        let outcome = load_workers(&backend, true).await;
        let records = outcome.records().unwrap();
        assert_eq!(records[0].name, "سارة");
        assert_eq!(records[0].is_accepted, Some(true));
    }
}
