//! HTTP middleware for admin.
//!
//! - `session` - In-memory session layer and one-shot notices
//! - `auth` - Extractors for the signed-in admin or worker

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin, RequireWorker};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, queue_notices, take_notices};
