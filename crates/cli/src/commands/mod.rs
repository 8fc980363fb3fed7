//! CLI command implementations.

pub mod login;
pub mod orders;
pub mod workers;

use krixo_admin::backend::{BackendClient, BackendError};
use krixo_admin::config::{AdminConfig, ConfigError};
use krixo_admin::error::AppError;
use krixo_admin::notify::EmailJsClient;
use krixo_admin::services::{Dashboard, Notice, NoticeLevel, TransitionController};
use thiserror::Error;

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend client could not be built.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The backend could not be reached and no fallback applies.
    #[error("Failed to load data: {0}")]
    Load(String),

    /// An action was refused or failed.
    #[error("{0}")]
    Action(#[from] AppError),
}

/// Clients and state for one CLI invocation.
pub struct Context {
    pub config: AdminConfig,
    pub backend: BackendClient,
    pub notifier: Option<EmailJsClient>,
    pub dashboard: Dashboard,
}

impl Context {
    /// Load configuration and build clients.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, CliError> {
        let config = AdminConfig::from_env()?;
        let backend = BackendClient::new(&config.backend)?;
        let notifier = config.emailjs().map(EmailJsClient::new);
        Ok(Self {
            config,
            backend,
            notifier,
            dashboard: Dashboard::new(),
        })
    }

    /// Load both collections, failing when the backend is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Load`] when the command listing fails with no fallback.
    pub async fn load(&self) -> Result<(), CliError> {
        let backend = &self.config.backend;
        let notices = self
            .dashboard
            .refresh(
                &self.backend,
                backend.worker_listing,
                backend.api_url != backend.backend_url,
            )
            .await;
        report(&notices);

        match &self.dashboard.snapshot().backend_error {
            Some(reason) => Err(CliError::Load(reason.clone())),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn transitions(&self) -> TransitionController<'_, BackendClient, EmailJsClient> {
        TransitionController::new(&self.backend, self.notifier.as_ref(), &self.dashboard)
    }
}

/// Log notices at a level matching their severity.
pub fn report(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}
