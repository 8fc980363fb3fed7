//! Integration test helpers for the KRIXO admin.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p krixo-integration-tests
//! ```
//!
//! No external services are needed. [`FakeBackend`] serves scripted
//! responses for the backend and EmailJS endpoints on a loopback port and
//! records every request body it receives.
//!
//! # Test Categories
//!
//! - `backend_client` - HTTP client against the fake backend
//! - `review_flow` - Loading, fallbacks and transitions end to end
//! - `admin_routes` - The router with sessions, driven by a cookie client

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use krixo_admin::config::{AdminConfig, AdminCredentials, BackendConfig, EmailJsConfig};
use krixo_admin::notify::EmailJsClient;
use krixo_admin::state::AppState;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

/// Admin username accepted by [`admin_config`].
pub const ADMIN_USERNAME: &str = "admin";
/// Admin password accepted by [`admin_config`].
pub const ADMIN_PASSWORD: &str = "test-password";

/// Error body the backend returns when a listing row has a `NULL` column.
#[must_use]
pub fn scan_defect_body() -> Value {
    json!({
        "message": "sql: Scan error on column index 6, name \"workers\": converting NULL to string is unsupported"
    })
}

/// Two orders: `c1` pending with a valid email, `c2` already approved.
#[must_use]
pub fn commands_payload() -> Value {
    json!({
        "data": [
            {
                "id": "c1",
                "fullname": "Sara Benali",
                "number": 555_0101,
                "email": "sara@example.com",
                "service": "moving, packing",
                "workers": 2,
                "start": "Algiers",
                "distination": "Oran",
                "price": 0,
                "status": "pending",
                "createdAt": "2024-03-01T09:00:00Z"
            },
            {
                "id": "c2",
                "name": "Karim",
                "status": "approved"
            }
        ]
    })
}

/// Two applications: `w1` pending, `w2` accepted.
#[must_use]
pub fn workers_payload() -> Value {
    json!([
        {"id": "w1", "fullname": "Nadia", "position": "driver", "isAccepted": null},
        {"id": "w2", "fullname": "Omar", "position": "packer", "isAccepted": true}
    ])
}

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    #[must_use]
    pub const fn status(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// Endpoint name, e.g. `UpdateCommandStatus`.
    pub endpoint: &'static str,
    /// JSON body, or `null` for GET requests.
    pub body: Value,
}

#[derive(Debug)]
struct Script {
    commands: Reply,
    workers: Reply,
    update_command: Reply,
    update_worker: Reply,
    email: Reply,
    recorded: Vec<Recorded>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            commands: Reply::ok(commands_payload()),
            workers: Reply::ok(workers_payload()),
            update_command: Reply::ok(json!({"message": "updated"})),
            update_worker: Reply::ok(json!({"message": "updated"})),
            email: Reply::ok(json!("OK")),
            recorded: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<Script>>;

fn lock(script: &Shared) -> MutexGuard<'_, Script> {
    script.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted stand-in for the KRIXO backend and the EmailJS send API.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    addr: SocketAddr,
    script: Shared,
}

impl FakeBackend {
    /// Start serving on an ephemeral loopback port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let script: Shared = Arc::default();
        let app = Router::new()
            .route("/GetCommands", get(get_commands))
            .route("/GetWorkers", get(get_workers))
            .route("/UpdateCommandStatus", put(update_command))
            .route("/UpdateWorkerStatus", put(update_worker))
            .route("/email/send", post(send_email))
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, script }
    }

    /// Base URL of the fake backend.
    ///
    /// # Panics
    ///
    /// Never in practice; the address is always a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("fake backend url")
    }

    /// URL of the fake EmailJS send endpoint.
    #[must_use]
    pub fn email_url(&self) -> String {
        format!("http://{}/email/send", self.addr)
    }

    pub fn set_commands(&self, reply: Reply) {
        lock(&self.script).commands = reply;
    }

    pub fn set_workers(&self, reply: Reply) {
        lock(&self.script).workers = reply;
    }

    pub fn set_update_command(&self, reply: Reply) {
        lock(&self.script).update_command = reply;
    }

    pub fn set_update_worker(&self, reply: Reply) {
        lock(&self.script).update_worker = reply;
    }

    pub fn set_email(&self, reply: Reply) {
        lock(&self.script).email = reply;
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn recorded(&self) -> Vec<Recorded> {
        lock(&self.script).recorded.clone()
    }

    /// Bodies received by one endpoint.
    #[must_use]
    pub fn bodies(&self, endpoint: &str) -> Vec<Value> {
        lock(&self.script)
            .recorded
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .map(|r| r.body.clone())
            .collect()
    }
}

async fn get_commands(State(script): State<Shared>) -> Reply {
    let mut script = lock(&script);
    script.recorded.push(Recorded {
        endpoint: "GetCommands",
        body: Value::Null,
    });
    script.commands.clone()
}

async fn get_workers(State(script): State<Shared>) -> Reply {
    let mut script = lock(&script);
    script.recorded.push(Recorded {
        endpoint: "GetWorkers",
        body: Value::Null,
    });
    script.workers.clone()
}

async fn update_command(State(script): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut script = lock(&script);
    script.recorded.push(Recorded {
        endpoint: "UpdateCommandStatus",
        body,
    });
    script.update_command.clone()
}

async fn update_worker(State(script): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut script = lock(&script);
    script.recorded.push(Recorded {
        endpoint: "UpdateWorkerStatus",
        body,
    });
    script.update_worker.clone()
}

async fn send_email(State(script): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut script = lock(&script);
    script.recorded.push(Recorded {
        endpoint: "email/send",
        body,
    });
    script.email.clone()
}

/// Backend configuration with both listing routes on `fake`.
#[must_use]
pub fn backend_config(fake: &FakeBackend) -> BackendConfig {
    BackendConfig {
        worker_listing: true,
        ..BackendConfig::single(fake.url())
    }
}

/// EmailJS configuration with test identifiers.
#[must_use]
pub fn emailjs_config() -> EmailJsConfig {
    EmailJsConfig {
        public_key: SecretString::from("pk_integration"),
        service_id: "service_test".to_string(),
        approved_template: "template_approved".to_string(),
        rejected_template: "template_rejected".to_string(),
    }
}

/// Admin configuration pointing at `fake` over plain HTTP.
///
/// # Panics
///
/// Never in practice; the bind address is a literal.
#[must_use]
pub fn admin_config(fake: &FakeBackend) -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().expect("loopback address"),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        backend: backend_config(fake),
        credentials: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
        emailjs: Some(emailjs_config()),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
        log_json: false,
        tls: None,
    }
}

/// A running admin panel wired to a [`FakeBackend`].
pub struct TestApp {
    pub url: Url,
    pub backend: FakeBackend,
    pub state: AppState,
}

impl TestApp {
    /// Start the admin router with sessions on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn start() -> Self {
        let backend = FakeBackend::start().await;
        let config = admin_config(&backend);

        let client = krixo_admin::backend::BackendClient::new(&config.backend)
            .expect("backend client");
        let notifier = EmailJsClient::with_send_url(&emailjs_config(), backend.email_url());
        let state = AppState::from_parts(config.clone(), client, Some(notifier));
        let app = krixo_admin::app::router(state.clone(), &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind admin");
        let addr = listener.local_addr().expect("admin address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/")).expect("admin url"),
            backend,
            state,
        }
    }

    /// Cookie-keeping client that follows redirects.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("http client")
    }

    /// Absolute URL for `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid relative reference.
    #[must_use]
    pub fn at(&self, path: &str) -> Url {
        self.url.join(path).expect("join url")
    }

    /// POST a urlencoded form and return the final page body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(
        &self,
        client: &reqwest::Client,
        path: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, String) {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let response = client
            .post(self.at(path))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("post form");
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, response.text().await.expect("response body"))
    }

    /// GET a page and return its final body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get_page(&self, client: &reqwest::Client, path: &str) -> (StatusCode, String) {
        let response = client.get(self.at(path)).send().await.expect("get page");
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, response.text().await.expect("response body"))
    }

    /// Sign in as the configured admin.
    pub async fn login_admin(&self, client: &reqwest::Client) -> String {
        let (_, body) = self
            .post_form(
                client,
                "login",
                &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
            )
            .await;
        body
    }
}
