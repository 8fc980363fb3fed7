//! Session-related types for the login gate.

use serde::{Deserialize, Serialize};

use krixo_core::WorkerProfile;

/// Who is signed in on this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum SessionUser {
    /// The configured admin.
    Admin { username: String },
    /// Any other login; sees the attached profile.
    Worker { profile: Box<WorkerProfile> },
}

impl SessionUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    /// Name shown in the page header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Admin { username } => username,
            Self::Worker { profile } => &profile.application.name,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for notices queued for the next page.
    pub const NOTICES: &str = "notices";
}
