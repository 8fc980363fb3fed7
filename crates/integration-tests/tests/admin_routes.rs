//! The admin router with sessions, driven by a cookie-keeping client.

use axum::http::StatusCode;
use krixo_admin::services::notices::messages;
use krixo_core::CommandStatus;
use krixo_integration_tests::{Reply, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_dashboard_requires_login() {
    let app = TestApp::start().await;
    let client = TestApp::client();

    let (status, body) = app.get_page(&client, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/login\""), "expected login page");
    assert!(app.backend.recorded().is_empty());
}

#[tokio::test]
async fn test_admin_login_loads_dashboard() {
    let app = TestApp::start().await;
    let client = TestApp::client();

    let body = app.login_admin(&client).await;
    assert!(body.contains("Sara Benali"));
    assert!(body.contains("data-pending-commands=\"1\""));
    assert!(body.contains("/commands/c1/approve"));
    assert!(!body.contains("/commands/c2/approve"));
    assert!(app.state.dashboard().snapshot().loaded);
}

#[tokio::test]
async fn test_other_credentials_open_worker_profile() {
    let app = TestApp::start().await;
    let client = TestApp::client();

    let (_, body) = app
        .post_form(&client, "/login", &[("username", "someone"), ("password", "x")])
        .await;
    assert!(!body.contains("data-pending-commands"));

    // Workers are kept off the dashboard
    let (_, body) = app.get_page(&client, "/").await;
    assert!(!body.contains("data-pending-commands"));
    assert!(app.backend.recorded().is_empty());
}

#[tokio::test]
async fn test_empty_login_shows_notice() {
    let app = TestApp::start().await;
    let client = TestApp::client();

    let (_, body) = app
        .post_form(&client, "/login", &[("username", ""), ("password", "")])
        .await;
    assert!(body.contains(messages::LOGIN_REQUIRED));
}

#[tokio::test]
async fn test_approve_command_flashes_notice_once() {
    let app = TestApp::start().await;
    let client = TestApp::client();
    app.login_admin(&client).await;

    let (status, body) = app.post_form(&client, "/commands/c1/approve", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(messages::COMMAND_APPROVED));
    assert!(body.contains("data-pending-commands=\"0\""));
    assert_eq!(app.backend.bodies("email/send").len(), 1);
    assert_eq!(
        app.state.dashboard().snapshot().commands[0].status,
        CommandStatus::Approved
    );

    let (_, again) = app.get_page(&client, "/?tab=commands").await;
    assert!(!again.contains(messages::COMMAND_APPROVED));
}

#[tokio::test]
async fn test_worker_approval_without_password_is_refused() {
    let app = TestApp::start().await;
    let client = TestApp::client();
    app.login_admin(&client).await;

    let (_, body) = app
        .post_form(&client, "/workers/w1/approve", &[("password", "")])
        .await;
    assert!(body.contains(messages::WORKER_PASSWORD_REQUIRED));
    assert!(app.backend.bodies("UpdateWorkerStatus").is_empty());

    let (_, body) = app
        .post_form(&client, "/workers/w1/approve", &[("password", "start-123")])
        .await;
    assert!(body.contains(messages::WORKER_APPROVED));
    assert_eq!(
        app.backend.bodies("UpdateWorkerStatus"),
        vec![json!({"workerId": "w1", "status": "approved", "password": "start-123"})]
    );
}

#[tokio::test]
async fn test_backend_outage_shows_error_panel() {
    let app = TestApp::start().await;
    app.backend.set_commands(Reply::status(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"message": "maintenance"}),
    ));
    let client = TestApp::client();

    let body = app.login_admin(&client).await;
    assert!(body.contains("maintenance"));
    assert!(body.contains("action=\"/refresh\""));

    app.backend.set_commands(Reply::ok(krixo_integration_tests::commands_payload()));
    let (_, body) = app
        .post_form(&client, "/refresh", &[("tab", "workers")])
        .await;
    assert!(!body.contains("maintenance"));
    assert!(body.contains("/workers/w1/approve"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::start().await;
    let client = TestApp::client();
    app.login_admin(&client).await;

    let (_, body) = app.post_form(&client, "/logout", &[]).await;
    assert!(body.contains("action=\"/login\""));

    let (_, body) = app.get_page(&client, "/").await;
    assert!(!body.contains("data-pending-commands"));
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let app = TestApp::start().await;
    let response = TestApp::client()
        .get(app.at("/health"))
        .send()
        .await
        .expect("health");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("x-frame-options").map(|v| v.as_bytes()),
        Some(&b"DENY"[..])
    );
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .map(|v| v.as_bytes()),
        Some(&b"nosniff"[..])
    );
    assert_eq!(response.text().await.expect("body"), "ok");
}
