//! Session middleware configuration for admin.
//!
//! Sessions live in process memory: the dashboard has no database, and a
//! restart signs everyone out. Cookies are `SameSite=Strict` with a 24 hour
//! inactivity expiry.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::AdminConfig;
use crate::models::session_keys;
use crate::services::Notice;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "krixo_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Queue notices for the next rendered page.
pub async fn queue_notices(session: &Session, notices: impl IntoIterator<Item = Notice>) {
    let mut queued: Vec<Notice> = session
        .get(session_keys::NOTICES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    queued.extend(notices);
    if queued.is_empty() {
        return;
    }
    if let Err(e) = session.insert(session_keys::NOTICES, queued).await {
        tracing::warn!(error = %e, "Failed to queue notices");
    }
}

/// Take every queued notice, leaving none behind.
pub async fn take_notices(session: &Session) -> Vec<Notice> {
    session
        .remove::<Vec<Notice>>(session_keys::NOTICES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
