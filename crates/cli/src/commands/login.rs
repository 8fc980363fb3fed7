//! Check what a username/password pair resolves to at the login gate.
//!
//! ```bash
//! krixo login -u admin -p password
//! ```

use krixo_admin::config::AdminConfig;
use krixo_admin::services::{AuthGate, LoginOutcome};
use secrecy::{ExposeSecret, SecretString};

use super::CliError;

/// Resolve a credential pair without starting the server.
///
/// # Errors
///
/// Returns error if configuration is invalid or either field is empty.
pub fn check(username: &str, password: &SecretString) -> Result<(), CliError> {
    let config = AdminConfig::from_env()?;
    let gate = AuthGate::new(config.credentials);

    match gate.login(username, password.expose_secret())? {
        LoginOutcome::Admin { username } => {
            tracing::info!(%username, "Credentials open the admin dashboard");
        }
        LoginOutcome::Worker(profile) => {
            tracing::info!(
                name = %profile.application.name,
                position = %profile.application.position,
                "Credentials open the sample worker profile"
            );
        }
    }
    Ok(())
}
