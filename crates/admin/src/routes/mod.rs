//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Auth (non-production stub)
//! GET  /login                    - Login page
//! POST /login                    - Sign in as admin or worker
//! POST /logout                   - Sign out
//!
//! # Dashboard (admin)
//! GET  /                         - Orders and applications (?tab=commands|workers)
//! POST /refresh                  - Reload from the backend
//!
//! # Service orders (admin)
//! POST /commands/{id}/approve    - Approve and email the customer
//! POST /commands/{id}/reject     - Reject and email the customer
//!
//! # Worker applications (admin)
//! POST /workers/{id}/approve     - Approve with an initial password
//! POST /workers/{id}/reject      - Reject
//!
//! # Worker
//! GET  /profile                  - Worker profile
//! ```

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod commands;
pub mod dashboard;
pub mod profile;
pub mod workers;

/// Build the page router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Dashboard
        .route("/", get(dashboard::dashboard))
        .route("/refresh", post(dashboard::refresh))
        // Service orders
        .route("/commands/{id}/approve", post(commands::approve))
        .route("/commands/{id}/reject", post(commands::reject))
        // Worker applications
        .route("/workers/{id}/approve", post(workers::approve))
        .route("/workers/{id}/reject", post(workers::reject))
        // Worker
        .route("/profile", get(profile::profile))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::backend::BackendClient;
    use crate::config::{AdminConfig, AdminCredentials, BackendConfig};
    use crate::middleware::create_session_layer;

    fn app() -> Router {
        // Nothing listens on the discard port; these tests never reach the backend
        let backend = BackendConfig::single(Url::parse("http://127.0.0.1:9/").unwrap());
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            backend: backend.clone(),
            credentials: AdminCredentials {
                username: "admin".to_string(),
                password: SecretString::from("password"),
            },
            emailjs: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            log_json: false,
            tls: None,
        };
        let session_layer = create_session_layer(&config);
        let client = BackendClient::new(&backend).unwrap();
        let state = AppState::from_parts(config, client, None);

        routes().layer(session_layer).with_state(state)
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let response = app()
            .oneshot(Request::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_redirects_anonymous_to_login() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_actions_require_admin() {
        for path in [
            "/commands/cmd-001/approve",
            "/workers/worker-001/reject",
            "/refresh",
        ] {
            let response = app()
                .oneshot(Request::post(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
            assert_eq!(location(&response), "/login", "{path}");
        }
    }

    #[tokio::test]
    async fn test_admin_login_sets_session_cookie() {
        let response = app()
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=admin&password=password"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with(crate::middleware::session::SESSION_COOKIE_NAME));
        assert!(cookie.contains("HttpOnly"));
    }
}
