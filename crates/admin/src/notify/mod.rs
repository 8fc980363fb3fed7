//! Customer notifications for service order decisions.
//!
//! Decisions on service orders are mailed to the customer through EmailJS.
//! Dispatch is best effort: the admin services log and report a failed
//! send, but never roll back the status change that triggered it.

use std::future::Future;

use krixo_core::{Decision, ServiceOrder};

mod emailjs;
mod error;

pub use emailjs::{DecisionEmail, EMAILJS_SEND_URL, EmailJsClient};
pub use error::NotificationError;

/// Sends the customer-facing email for a service order decision.
pub trait Notifier: Send + Sync {
    fn send_decision(
        &self,
        order: &ServiceOrder,
        decision: Decision,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}
