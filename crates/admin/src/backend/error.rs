//! Backend-related errors.

use thiserror::Error;

/// Error substrings the backend emits when its database driver fails to
/// scan a `NULL` column into a listing row.
const SCAN_DEFECT_SIGNATURES: &[&str] = &["sql: Scan error", "converting driver.Value"];

/// Errors that can occur when talking to the KRIXO backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// HTTP request failed before a response arrived.
    #[error("Backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, or the raw body text.
        message: Option<String>,
    },

    /// Failed to parse a success response.
    #[error("Backend response error: {0}")]
    Response(String),
}

impl BackendError {
    /// Human-readable reason, preferring the backend's own message.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this failure is the backend's known listing scan defect.
    #[must_use]
    pub fn is_scan_defect(&self) -> bool {
        let text = self.to_string();
        SCAN_DEFECT_SIGNATURES.iter().any(|sig| text.contains(sig))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Response(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
