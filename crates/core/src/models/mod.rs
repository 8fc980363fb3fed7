//! Canonical records shown in the admin dashboard.
//!
//! Every field is always populated: missing backend values are replaced by
//! [`UNSPECIFIED`] (or an empty string for free text) during normalization.

pub mod command;
pub mod worker;

pub use command::ServiceOrder;
pub use worker::{WorkerApplication, WorkerProfile};

/// Placeholder shown for missing display fields ("unspecified").
pub const UNSPECIFIED: &str = "غير محدد";
