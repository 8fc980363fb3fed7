//! Worker application actions.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use krixo_core::WorkerId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::dashboard::Tab;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, queue_notices};
use crate::services::notices::messages;
use crate::services::{Notice, TransitionReport};
use crate::state::AppState;

/// Approve form data.
#[derive(Deserialize)]
pub struct ApproveForm {
    /// Initial account password for the worker.
    #[serde(default)]
    pub password: String,
}

/// Approve a pending application with an initial password.
#[instrument(skip(state, session, form))]
pub async fn approve(
    RequireAdmin(_username): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ApproveForm>,
) -> Redirect {
    let id = WorkerId::new(id);
    let result = state.transitions().approve_worker(&id, &form.password).await;
    finish(&session, &id, result, messages::WORKER_APPROVE_FAILED).await
}

/// Reject a pending application.
#[instrument(skip(state, session))]
pub async fn reject(
    RequireAdmin(_username): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Redirect {
    let id = WorkerId::new(id);
    let result = state.transitions().reject_worker(&id).await;
    finish(&session, &id, result, messages::WORKER_REJECT_FAILED).await
}

async fn finish(
    session: &Session,
    id: &WorkerId,
    result: Result<TransitionReport, AppError>,
    fallback: &str,
) -> Redirect {
    let notices = match result {
        Ok(report) => report.notices,
        Err(e) => {
            tracing::warn!(error = %e, worker_id = %id, "Worker transition failed");
            vec![Notice::from_error(&e, fallback)]
        }
    };
    queue_notices(session, notices).await;
    Redirect::to(&Tab::Workers.location())
}
