//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Stub login gate (admin pair or sample worker profile)
//! - `dashboard` - In-memory snapshot of orders and applications
//! - `loader` - Listing with primary/direct/sample fallback
//! - `notices` - One-shot messages shown after an action
//! - `transitions` - Approve/reject flow for orders and applications

pub mod auth;
pub mod dashboard;
pub mod loader;
pub mod notices;
pub mod transitions;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthGate, LoginOutcome};
pub use dashboard::{BusyGuard, Dashboard, DashboardSnapshot};
pub use loader::{LoadOutcome, load_commands, load_workers};
pub use notices::{Notice, NoticeLevel};
pub use transitions::{EmailOutcome, TransitionController, TransitionReport};
