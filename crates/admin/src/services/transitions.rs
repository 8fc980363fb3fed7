//! Status transitions for service orders and worker applications.
//!
//! Each transition runs under the dashboard busy flag:
//! 1. Validate locally (no network call on failure)
//! 2. Record the decision on the backend
//! 3. Swap in the next snapshot derived by the reducer
//! 4. For service orders, email the customer (best effort)
//!
//! A failed backend call leaves the snapshot untouched. Nothing is retried.

use krixo_core::reducer::{Reviewable, apply_decision, find};
use krixo_core::{CommandId, Decision, ServiceOrder, WorkerId};
use tracing::{debug, info, instrument, warn};

use super::dashboard::Dashboard;
use super::notices::{Notice, messages};
use crate::backend::AdminBackend;
use crate::error::AppError;
use crate::notify::Notifier;

/// Fate of the customer email after a service order decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailOutcome {
    Sent,
    /// No notifier configured, or the order is not in the snapshot.
    Skipped,
    Failed,
}

/// What a successful transition reports back to the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReport {
    pub notices: Vec<Notice>,
    /// `None` for worker applications.
    pub email: Option<EmailOutcome>,
}

/// Runs status transitions against the backend and the dashboard.
pub struct TransitionController<'a, B, N> {
    backend: &'a B,
    notifier: Option<&'a N>,
    dashboard: &'a Dashboard,
}

impl<'a, B: AdminBackend, N: Notifier> TransitionController<'a, B, N> {
    #[must_use]
    pub const fn new(backend: &'a B, notifier: Option<&'a N>, dashboard: &'a Dashboard) -> Self {
        Self {
            backend,
            notifier,
            dashboard,
        }
    }

    /// Approve a service order and notify the customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Busy`] while another transition runs,
    /// [`AppError::Validation`] if the order was already decided, or
    /// [`AppError::Backend`] if the backend rejects the update.
    pub async fn approve_command(&self, id: &CommandId) -> Result<TransitionReport, AppError> {
        self.decide_command(id, Decision::Approve).await
    }

    /// Reject a service order and notify the customer.
    ///
    /// # Errors
    ///
    /// See [`Self::approve_command`].
    pub async fn reject_command(&self, id: &CommandId) -> Result<TransitionReport, AppError> {
        self.decide_command(id, Decision::Reject).await
    }

    /// Approve a worker application, handing the worker an initial password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty password without calling
    /// the backend; otherwise as [`Self::approve_command`].
    pub async fn approve_worker(
        &self,
        id: &WorkerId,
        password: &str,
    ) -> Result<TransitionReport, AppError> {
        if password.trim().is_empty() {
            return Err(AppError::Validation(
                messages::WORKER_PASSWORD_REQUIRED.to_string(),
            ));
        }
        self.decide_worker(id, Decision::Approve, Some(password))
            .await
    }

    /// Reject a worker application.
    ///
    /// # Errors
    ///
    /// See [`Self::approve_command`].
    pub async fn reject_worker(&self, id: &WorkerId) -> Result<TransitionReport, AppError> {
        self.decide_worker(id, Decision::Reject, None).await
    }

    #[instrument(skip(self), fields(command_id = %id))]
    async fn decide_command(
        &self,
        id: &CommandId,
        decision: Decision,
    ) -> Result<TransitionReport, AppError> {
        let _guard = self.dashboard.try_begin()?;

        let snapshot = self.dashboard.snapshot();
        let order = find(&snapshot.commands, id.as_str()).cloned();
        ensure_pending(order.as_ref())?;

        self.backend.update_command_status(id, decision).await?;
        self.dashboard.update(|current| {
            let mut next = current.clone();
            next.commands = apply_decision(&current.commands, id.as_str(), decision);
            next
        });
        info!(decision = %decision, "Command status updated");

        let email = match order {
            Some(order) => self.notify(&order, decision).await,
            None => {
                debug!("Command not in snapshot, skipping customer email");
                EmailOutcome::Skipped
            }
        };

        let sent = email == EmailOutcome::Sent;
        let headline = match (decision, sent) {
            (Decision::Approve, true) => messages::COMMAND_APPROVED,
            (Decision::Reject, true) => messages::COMMAND_REJECTED,
            (Decision::Approve, false) => messages::COMMAND_APPROVED_NO_EMAIL,
            (Decision::Reject, false) => messages::COMMAND_REJECTED_NO_EMAIL,
        };
        let mut notices = vec![Notice::success(headline)];
        if email == EmailOutcome::Failed {
            notices.push(Notice::warning(messages::EMAIL_FAILED));
        }

        Ok(TransitionReport {
            notices,
            email: Some(email),
        })
    }

    #[instrument(skip(self, password), fields(worker_id = %id))]
    async fn decide_worker(
        &self,
        id: &WorkerId,
        decision: Decision,
        password: Option<&str>,
    ) -> Result<TransitionReport, AppError> {
        let _guard = self.dashboard.try_begin()?;

        let snapshot = self.dashboard.snapshot();
        ensure_pending(find(&snapshot.workers, id.as_str()))?;

        self.backend
            .update_worker_status(id, decision, password)
            .await?;
        self.dashboard.update(|current| {
            let mut next = current.clone();
            next.workers = apply_decision(&current.workers, id.as_str(), decision);
            next
        });
        info!(decision = %decision, "Worker application status updated");

        let headline = match decision {
            Decision::Approve => messages::WORKER_APPROVED,
            Decision::Reject => messages::WORKER_REJECTED,
        };
        Ok(TransitionReport {
            notices: vec![Notice::success(headline)],
            email: None,
        })
    }

    async fn notify(&self, order: &ServiceOrder, decision: Decision) -> EmailOutcome {
        let Some(notifier) = self.notifier else {
            debug!("EmailJS not configured, skipping customer email");
            return EmailOutcome::Skipped;
        };

        match notifier.send_decision(order, decision).await {
            Ok(()) => EmailOutcome::Sent,
            Err(e) => {
                warn!(error = %e, command_id = %order.id, "Customer email failed");
                EmailOutcome::Failed
            }
        }
    }
}

/// Refuse records that exist locally but already left pending.
fn ensure_pending<T: Reviewable>(record: Option<&T>) -> Result<(), AppError> {
    match record {
        Some(r) if !r.is_pending() => Err(AppError::Validation(
            messages::ALREADY_DECIDED.to_string(),
        )),
        _ => Ok(()),
    }
}
