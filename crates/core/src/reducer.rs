//! Pure status transitions over record snapshots.
//!
//! The admin keeps each collection as an immutable snapshot. After the
//! backend confirms an update, the next snapshot is derived here by id:
//! the matching record gets its new status and every other record is
//! carried over unchanged. An unknown id yields an identical snapshot.

use crate::models::{ServiceOrder, WorkerApplication};
use crate::types::Decision;

/// A record that an admin can approve or reject.
pub trait Reviewable: Clone {
    /// Backend identifier of the record.
    fn key(&self) -> &str;

    /// Whether the record still awaits a decision.
    fn is_pending(&self) -> bool;

    /// Copy of the record after `decision`; only the status changes.
    #[must_use]
    fn decided(&self, decision: Decision) -> Self;
}

impl Reviewable for ServiceOrder {
    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn is_pending(&self) -> bool {
        Self::is_pending(self)
    }

    fn decided(&self, decision: Decision) -> Self {
        self.with_status(decision.command_status())
    }
}

impl Reviewable for WorkerApplication {
    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn is_pending(&self) -> bool {
        Self::is_pending(self)
    }

    fn decided(&self, decision: Decision) -> Self {
        self.with_status(decision.application_status())
    }
}

/// Find a record by id.
#[must_use]
pub fn find<'a, T: Reviewable>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.key() == id)
}

/// Derive the next snapshot after `decision` on record `id`.
#[must_use]
pub fn apply_decision<T: Reviewable>(records: &[T], id: &str, decision: Decision) -> Vec<T> {
    records
        .iter()
        .map(|r| if r.key() == id { r.decided(decision) } else { r.clone() })
        .collect()
}

/// Number of records still awaiting a decision.
#[must_use]
pub fn pending_count<T: Reviewable>(records: &[T]) -> usize {
    records.iter().filter(|r| r.is_pending()).count()
}
