//! Worker application review commands.
//!
//! # Usage
//!
//! ```bash
//! krixo workers list
//! krixo workers approve worker-001 --password 'initial-password'
//! krixo workers reject worker-001
//! ```
//!
//! Listing requires `KRIXO_WORKER_LISTING=true`.

use krixo_admin::error::AppError;
use krixo_admin::services::notices::messages;
use krixo_core::{Decision, WorkerId};
use secrecy::{ExposeSecret, SecretString};

use super::{CliError, Context, report};

/// Log every worker application in the current listing.
///
/// # Errors
///
/// Returns error if configuration is invalid or the backend cannot be reached.
pub async fn list() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    if !ctx.config.backend.worker_listing {
        tracing::warn!("KRIXO_WORKER_LISTING is off, no applications will be listed");
    }
    ctx.load().await?;

    let snapshot = ctx.dashboard.snapshot();
    tracing::info!(
        total = snapshot.workers.len(),
        pending = snapshot.pending_workers(),
        "Worker applications"
    );
    for worker in &snapshot.workers {
        tracing::info!(
            id = %worker.id,
            status = worker.status().label(),
            name = %worker.name,
            position = %worker.position,
            experience = %worker.experience,
            "application"
        );
    }
    Ok(())
}

/// Approve an application with an initial password, or reject it.
///
/// A missing password is refused before configuration is read or the
/// backend is contacted.
///
/// # Errors
///
/// Returns error if the password is missing on approval, the application
/// was already decided, or the backend rejects the update.
pub async fn decide(
    id: &str,
    decision: Decision,
    password: Option<SecretString>,
) -> Result<(), CliError> {
    let password = approval_password(decision, password.as_ref())?;

    let ctx = Context::from_env()?;
    ctx.load().await?;

    let id = WorkerId::new(id);
    let transitions = ctx.transitions();
    let result = match password {
        Some(password) => transitions.approve_worker(&id, password).await?,
        None => transitions.reject_worker(&id).await?,
    };

    tracing::info!(id = %id, decision = %decision, "Application updated");
    report(&result.notices);
    Ok(())
}

/// Password to hand an approved worker, checked before the backend is contacted.
///
/// Returns `None` for rejections.
fn approval_password(
    decision: Decision,
    password: Option<&SecretString>,
) -> Result<Option<&str>, AppError> {
    match decision {
        Decision::Reject => Ok(None),
        Decision::Approve => match password.map(|p| p.expose_secret()) {
            Some(p) if !p.trim().is_empty() => Ok(Some(p)),
            _ => Err(AppError::Validation(
                messages::WORKER_PASSWORD_REQUIRED.to_string(),
            )),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_password_refused_on_approve() {
        for blank in ["", "   "] {
            let secret = SecretString::from(blank);
            let err = approval_password(Decision::Approve, Some(&secret)).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == messages::WORKER_PASSWORD_REQUIRED));
        }
        assert!(approval_password(Decision::Approve, None).is_err());
    }

    #[test]
    fn test_password_passed_through_on_approve() {
        let secret = SecretString::from("welcome-1");
        assert_eq!(
            approval_password(Decision::Approve, Some(&secret)).unwrap(),
            Some("welcome-1")
        );
    }

    #[test]
    fn test_reject_needs_no_password() {
        assert_eq!(approval_password(Decision::Reject, None).unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_password_fails_before_loading() {
        // No backend is configured or reachable; the error must be the password check
        let err = decide("w1", Decision::Approve, Some(SecretString::from("")))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Action(AppError::Validation(_))), "{err}");
    }
}
