//! Login gate.
//!
//! This is not real authentication. The configured admin pair opens the
//! dashboard; any other non-empty pair opens the fixed sample worker
//! profile. It exists so the review flow can be exercised end to end.

use krixo_core::WorkerProfile;
use krixo_core::sample::sample_worker_profile;
use tracing::{info, instrument, warn};

use super::notices::messages;
use crate::config::AdminCredentials;
use crate::error::AppError;

/// Who a login resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Admin { username: String },
    Worker(Box<WorkerProfile>),
}

/// Stub credential check.
#[derive(Debug, Clone)]
pub struct AuthGate {
    credentials: AdminCredentials,
}

impl AuthGate {
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Log that the gate is a stub. Called once at startup.
    pub fn warn_stub(&self) {
        warn!(
            admin_username = %self.credentials.username,
            "Login is a non-production stub: any non-admin credentials open the sample worker profile"
        );
    }

    /// Resolve a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is empty.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(messages::LOGIN_REQUIRED.to_string()));
        }

        if self.credentials.matches(username, password) {
            info!("Admin signed in");
            return Ok(LoginOutcome::Admin {
                username: username.to_owned(),
            });
        }

        info!("Non-admin credentials, showing sample worker profile");
        Ok(LoginOutcome::Worker(Box::new(sample_worker_profile())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn gate() -> AuthGate {
        AuthGate::new(AdminCredentials {
            username: "admin".to_string(),
            password: SecretString::from("password"),
        })
    }

    #[test]
    fn test_admin_pair() {
        assert_eq!(
            gate().login("admin", "password").unwrap(),
            LoginOutcome::Admin {
                username: "admin".to_string()
            }
        );
    }

    #[test]
    fn test_other_credentials_get_sample_profile() {
        for (user, pass) in [("worker", "anything"), ("admin", "wrong"), ("ADMIN", "password")] {
            match gate().login(user, pass).unwrap() {
                LoginOutcome::Worker(profile) => assert_eq!(*profile, sample_worker_profile()),
                LoginOutcome::Admin { .. } => panic!("{user}/{pass} must not be admin"),
            }
        }
    }

    #[test]
    fn test_admin_username_matched_exactly() {
        for user in [" admin", "admin ", " admin "] {
            assert!(
                matches!(gate().login(user, "password").unwrap(), LoginOutcome::Worker(_)),
                "{user:?} must not be admin"
            );
        }
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(matches!(
            gate().login("  ", "password"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(gate().login("admin", ""), Err(AppError::Validation(_))));
    }
}
