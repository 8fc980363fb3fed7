//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{BackendClient, BackendError};
use crate::config::AdminConfig;
use crate::notify::EmailJsClient;
use crate::services::{AuthGate, Dashboard, Notice, TransitionController};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: BackendClient,
    notifier: Option<EmailJsClient>,
    dashboard: Dashboard,
    auth: AuthGate,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the backend HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        let notifier = config.emailjs().map(EmailJsClient::new);
        if notifier.is_none() {
            tracing::info!("EMAILJS_PUBLIC_KEY not set, customer emails disabled");
        }
        Ok(Self::from_parts(config, backend, notifier))
    }

    /// Build state from already constructed clients.
    #[must_use]
    pub fn from_parts(
        config: AdminConfig,
        backend: BackendClient,
        notifier: Option<EmailJsClient>,
    ) -> Self {
        let auth = AuthGate::new(config.credentials.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                notifier,
                dashboard: Dashboard::new(),
                auth,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.inner.dashboard
    }

    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.inner.auth
    }

    /// Controller for approve/reject actions.
    #[must_use]
    pub fn transitions(&self) -> TransitionController<'_, BackendClient, EmailJsClient> {
        TransitionController::new(
            &self.inner.backend,
            self.inner.notifier.as_ref(),
            &self.inner.dashboard,
        )
    }

    /// Reload the dashboard from the backend.
    pub async fn refresh(&self) -> Vec<Notice> {
        let backend = &self.inner.config.backend;
        let proxy_configured = backend.api_url != backend.backend_url;
        self.inner
            .dashboard
            .refresh(&self.inner.backend, backend.worker_listing, proxy_configured)
            .await
    }
}
