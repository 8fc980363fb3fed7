//! Service order actions.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use krixo_core::{CommandId, Decision};
use tower_sessions::Session;
use tracing::instrument;

use super::dashboard::Tab;
use crate::middleware::{RequireAdmin, queue_notices};
use crate::services::Notice;
use crate::services::notices::messages;
use crate::state::AppState;

/// Approve a pending service order.
#[instrument(skip(state, session))]
pub async fn approve(
    RequireAdmin(_username): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Redirect {
    decide(&state, &session, CommandId::new(id), Decision::Approve).await
}

/// Reject a pending service order.
#[instrument(skip(state, session))]
pub async fn reject(
    RequireAdmin(_username): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Redirect {
    decide(&state, &session, CommandId::new(id), Decision::Reject).await
}

async fn decide(state: &AppState, session: &Session, id: CommandId, decision: Decision) -> Redirect {
    let transitions = state.transitions();
    let result = match decision {
        Decision::Approve => transitions.approve_command(&id).await,
        Decision::Reject => transitions.reject_command(&id).await,
    };

    let notices = match result {
        Ok(report) => report.notices,
        Err(e) => {
            tracing::warn!(error = %e, command_id = %id, "Command transition failed");
            let fallback = match decision {
                Decision::Approve => messages::COMMAND_APPROVE_FAILED,
                Decision::Reject => messages::COMMAND_REJECT_FAILED,
            };
            vec![Notice::from_error(&e, fallback)]
        }
    };
    queue_notices(session, notices).await;
    Redirect::to(&Tab::Commands.location())
}
