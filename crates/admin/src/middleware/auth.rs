//! Authentication extractors for admin.
//!
//! Provides extractors that read the signed-in [`SessionUser`] in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use krixo_core::WorkerProfile;
use tower_sessions::Session;

use crate::models::{SessionUser, session_keys};

/// Extractor that requires the admin to be signed in.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(username): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {username}!")
/// }
/// ```
pub struct RequireAdmin(pub String);

/// Extractor that requires a worker login and yields its profile.
pub struct RequireWorker(pub Box<WorkerProfile>);

/// Extractor that optionally gets the signed-in user.
pub struct OptionalUser(pub Option<SessionUser>);

/// Rejection for the authentication extractors.
pub enum AuthRejection {
    /// No session layer; a server misconfiguration.
    NoSession,
    /// Not signed in.
    RedirectToLogin,
    /// Signed in with the other role; send them to their home page.
    RedirectHome(&'static str),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NoSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectHome(path) => Redirect::to(path).into_response(),
        }
    }
}

/// Home page for a signed-in user.
#[must_use]
pub const fn home_path(user: &SessionUser) -> &'static str {
    match user {
        SessionUser::Admin { .. } => "/",
        SessionUser::Worker { .. } => "/profile",
    }
}

async fn current_user(parts: &Parts) -> Result<Option<SessionUser>, AuthRejection> {
    // Set by SessionManagerLayer
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::NoSession)?;

    Ok(session
        .get::<SessionUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten())
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match current_user(parts).await? {
            Some(SessionUser::Admin { username }) => Ok(Self(username)),
            Some(other) => Err(AuthRejection::RedirectHome(home_path(&other))),
            None => Err(AuthRejection::RedirectToLogin),
        }
    }
}

impl<S> FromRequestParts<S> for RequireWorker
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match current_user(parts).await? {
            Some(SessionUser::Worker { profile }) => Ok(Self(profile)),
            Some(other) => Err(AuthRejection::RedirectHome(home_path(&other))),
            None => Err(AuthRejection::RedirectToLogin),
        }
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts).await.ok().flatten()))
    }
}
