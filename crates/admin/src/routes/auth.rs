//! Login and logout handlers.

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::auth::home_path;
use crate::middleware::{OptionalUser, queue_notices, take_notices};
use crate::models::{SessionUser, session_keys};
use crate::services::{LoginOutcome, Notice};
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub notices: Vec<Notice>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Display the login page, or send a signed-in user home.
pub async fn login_page(OptionalUser(user): OptionalUser, session: Session) -> Response {
    if let Some(user) = user {
        return Redirect::to(home_path(&user)).into_response();
    }

    let template = LoginTemplate {
        notices: take_notices(&session).await,
    };
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
    .into_response()
}

/// Resolve the submitted credentials through the login gate.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let user = match state.auth().login(&form.username, &form.password) {
        Ok(LoginOutcome::Admin { username }) => SessionUser::Admin { username },
        Ok(LoginOutcome::Worker(profile)) => SessionUser::Worker { profile },
        Err(e) => {
            queue_notices(&session, [Notice::from_error(&e, "")]).await;
            return Redirect::to("/login");
        }
    };

    // New id on privilege change
    if let Err(e) = session.cycle_id().await {
        tracing::warn!(error = %e, "Failed to cycle session id");
    }
    if let Err(e) = session.insert(session_keys::CURRENT_USER, &user).await {
        tracing::error!(error = %e, "Failed to store session user");
        queue_notices(&session, [Notice::error(e.to_string())]).await;
        return Redirect::to("/login");
    }

    set_sentry_user(user.display_name());
    Redirect::to(home_path(&user))
}

/// Sign out and return to the login page.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to flush session");
    }
    clear_sentry_user();
    Redirect::to("/login")
}
