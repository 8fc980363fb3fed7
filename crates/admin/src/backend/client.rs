//! KRIXO backend HTTP client.

use krixo_core::{CommandId, Decision, WorkerId};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::AdminBackend;
use super::error::BackendError;
use super::types::{ListingRoute, UpdateCommandStatus, UpdateWorkerStatus};
use crate::config::BackendConfig;

/// Longest raw error body kept in a [`BackendError::Status`] message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client for the KRIXO backend REST API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    api_url: Url,
    backend_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            backend_url: config.backend_url.clone(),
        })
    }

    fn endpoint(base: &Url, path: &str) -> String {
        format!("{}/{path}", base.as_str().trim_end_matches('/'))
    }

    fn listing_base(&self, route: ListingRoute) -> &Url {
        match route {
            ListingRoute::Primary => &self.api_url,
            ListingRoute::Direct => &self.backend_url,
        }
    }

    async fn get_json(&self, url: String) -> Result<Value, BackendError> {
        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        let payload = response.json::<Value>().await?;
        debug!(url = %url, "Backend listing fetched");
        Ok(payload)
    }

    async fn put_json<T: serde::Serialize + Sync>(
        &self,
        url: String,
        body: &T,
    ) -> Result<(), BackendError> {
        let response = self.client.put(&url).json(body).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

impl AdminBackend for BackendClient {
    #[instrument(skip(self))]
    async fn list_commands(&self, route: ListingRoute) -> Result<Value, BackendError> {
        let url = Self::endpoint(self.listing_base(route), "GetCommands");
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn list_workers(&self) -> Result<Value, BackendError> {
        let url = Self::endpoint(&self.backend_url, "GetWorkers");
        self.get_json(url).await
    }

    #[instrument(skip(self), fields(command_id = %id))]
    async fn update_command_status(
        &self,
        id: &CommandId,
        decision: Decision,
    ) -> Result<(), BackendError> {
        let body = UpdateCommandStatus {
            command_id: id.as_str(),
            status: decision.wire_status(),
        };
        let url = Self::endpoint(&self.backend_url, "UpdateCommandStatus");
        self.put_json(url, &body).await
    }

    #[instrument(skip(self, password), fields(worker_id = %id))]
    async fn update_worker_status(
        &self,
        id: &WorkerId,
        decision: Decision,
        password: Option<&str>,
    ) -> Result<(), BackendError> {
        let body = UpdateWorkerStatus {
            worker_id: id.as_str(),
            status: decision.wire_status(),
            password,
        };
        let url = Self::endpoint(&self.backend_url, "UpdateWorkerStatus");
        self.put_json(url, &body).await
    }
}

/// Turn a non-success response into [`BackendError::Status`].
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(status = status.as_u16(), message = ?message, "Backend error response");

    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Extract the backend's `message` (or `error`) field from an error body,
/// falling back to the trimmed body text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed)
        && let Some(message) = ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
    {
        return Some(message.to_owned());
    }

    Some(trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect())
}
