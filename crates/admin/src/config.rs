//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Server
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the admin panel (default: <http://localhost:3001>)
//!
//! ## Backend
//! - `KRIXO_BACKEND_URL` - KRIXO backend base URL (default: <https://gokrixo.onrender.com>)
//! - `KRIXO_API_URL` - Base URL for the primary listing call, e.g. a proxy
//!   (default: same as `KRIXO_BACKEND_URL`)
//! - `KRIXO_BACKEND_TIMEOUT_SECS` - Request timeout (default: none)
//! - `KRIXO_WORKER_LISTING` - Fetch worker applications from the backend (default: false)
//!
//! ## Login (non-production stub)
//! - `KRIXO_ADMIN_USERNAME` - Admin username (default: admin)
//! - `KRIXO_ADMIN_PASSWORD` - Admin password (default: password)
//!
//! ## Optional (EmailJS - enables customer notifications)
//! - `EMAILJS_PUBLIC_KEY` - EmailJS public key; notifications are disabled without it
//! - `EMAILJS_SERVICE_ID` - EmailJS service (default: `service_krixo`)
//! - `EMAILJS_APPROVED_TEMPLATE` - Template for approvals (default: `template_command_approved`)
//! - `EMAILJS_REJECTED_TEMPLATE` - Template for rejections (default: `template_command_rejected`)
//!
//! ## Optional (observability)
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//! - `KRIXO_LOG_JSON` - Emit JSON logs (default: false)
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "https://gokrixo.onrender.com";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "password";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "admin",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// KRIXO backend configuration
    pub backend: BackendConfig,
    /// Stub login credentials
    pub credentials: AdminCredentials,
    /// EmailJS configuration (optional - customer notifications)
    pub emailjs: Option<EmailJsConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// KRIXO backend endpoints.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL, used for updates and the "direct" listing.
    pub backend_url: Url,
    /// Base URL for the primary listing call.
    pub api_url: Url,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Whether the worker tab is populated from the backend.
    pub worker_listing: bool,
}

impl BackendConfig {
    /// Configuration pointing both listing paths at one URL.
    #[must_use]
    pub fn single(backend_url: Url) -> Self {
        Self {
            api_url: backend_url.clone(),
            backend_url,
            timeout: None,
            worker_listing: false,
        }
    }
}

/// Hardcoded admin credential pair for the stub login gate.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// EmailJS configuration for order decision emails.
///
/// Implements `Debug` manually to redact the public key.
#[derive(Clone)]
pub struct EmailJsConfig {
    /// EmailJS public key (`user_id` in the send API).
    pub public_key: SecretString,
    /// EmailJS service id.
    pub service_id: String,
    /// Template used when an order is approved.
    pub approved_template: String,
    /// Template used when an order is rejected.
    pub rejected_template: String,
}

impl std::fmt::Debug for EmailJsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsConfig")
            .field("public_key", &"[REDACTED]")
            .field("service_id", &self.service_id)
            .field("approved_template", &self.approved_template)
            .field("rejected_template", &self.rejected_template)
            .finish()
    }
}

/// TLS configuration for HTTPS.
///
/// Implements `Debug` manually to redact the private key.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cert_pem = get_optional_env("ADMIN_TLS_CERT");
        let key_pem = get_optional_env("ADMIN_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_*".to_string(),
                "Both ADMIN_TLS_CERT and ADMIN_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("ADMIN_BASE_URL", "http://localhost:3001");

        let backend = BackendConfig::from_env()?;
        let credentials = AdminCredentials::from_env();
        let emailjs = EmailJsConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let log_json = get_bool_env("KRIXO_LOG_JSON")?;
        let tls = TlsConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            backend,
            credentials,
            emailjs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            log_json,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the EmailJS configuration, if available.
    ///
    /// Returns `None` if `EMAILJS_PUBLIC_KEY` was not set, which disables
    /// customer notification emails.
    #[must_use]
    pub const fn emailjs(&self) -> Option<&EmailJsConfig> {
        self.emailjs.as_ref()
    }

    /// Whether the session cookie should be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend_url = parse_url(
            "KRIXO_BACKEND_URL",
            &get_env_or_default("KRIXO_BACKEND_URL", DEFAULT_BACKEND_URL),
        )?;
        let api_url = match get_optional_env("KRIXO_API_URL") {
            Some(raw) => parse_url("KRIXO_API_URL", &raw)?,
            None => backend_url.clone(),
        };
        let timeout = get_optional_env("KRIXO_BACKEND_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "KRIXO_BACKEND_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            backend_url,
            api_url,
            timeout,
            worker_listing: get_bool_env("KRIXO_WORKER_LISTING")?,
        })
    }
}

impl AdminCredentials {
    /// Load the stub login pair.
    ///
    /// Weak values are accepted with a warning: the gate is not real
    /// authentication.
    fn from_env() -> Self {
        let username = get_env_or_default("KRIXO_ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME);
        let password = get_env_or_default("KRIXO_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);

        if let Err(e) = validate_secret_strength(&password, "KRIXO_ADMIN_PASSWORD") {
            tracing::warn!("KRIXO_ADMIN_PASSWORD validation warning: {e}");
        }

        Self {
            username,
            password: SecretString::from(password),
        }
    }
}

impl EmailJsConfig {
    /// Load EmailJS configuration from environment.
    ///
    /// Returns `None` if `EMAILJS_PUBLIC_KEY` is not set (notifications disabled).
    fn from_env() -> Option<Self> {
        let public_key = get_optional_env("EMAILJS_PUBLIC_KEY")?;

        Some(Self {
            public_key: SecretString::from(public_key),
            service_id: get_env_or_default("EMAILJS_SERVICE_ID", "service_krixo"),
            approved_template: get_env_or_default(
                "EMAILJS_APPROVED_TEMPLATE",
                "template_command_approved",
            ),
            rejected_template: get_env_or_default(
                "EMAILJS_REJECTED_TEMPLATE",
                "template_command_rejected",
            ),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a boolean flag (default: false).
fn get_bool_env(key: &str) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(false), |raw| parse_bool(key, &raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

impl AdminCredentials {
    /// Check a submitted pair against the configured one.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            backend: BackendConfig::single(Url::parse(DEFAULT_BACKEND_URL).unwrap()),
            credentials: AdminCredentials {
                username: "admin".to_string(),
                password: SecretString::from("password"),
            },
            emailjs: Some(EmailJsConfig {
                public_key: SecretString::from("pk_live_abc123"),
                service_id: "service_krixo".to_string(),
                approved_template: "template_command_approved".to_string(),
                rejected_template: "template_command_rejected".to_string(),
            }),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            log_json: false,
            tls: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert!(!config.is_secure());
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_default_password_is_flagged() {
        let result = validate_secret_strength(DEFAULT_ADMIN_PASSWORD, "KRIXO_ADMIN_PASSWORD");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_strong_password_passes() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "X").is_ok());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", " ON ").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_parse_url_rejects_other_schemes() {
        assert!(parse_url("X", "https://gokrixo.onrender.com").is_ok());
        assert!(parse_url("X", "ftp://gokrixo.onrender.com").is_err());
        assert!(parse_url("X", "not a url").is_err());
    }

    #[test]
    fn test_credentials_match() {
        let config = test_config();
        assert!(config.credentials.matches("admin", "password"));
        assert!(!config.credentials.matches("admin", "Password"));
        assert!(!config.credentials.matches("worker@krixo.app", "password"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = test_config();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("pk_live_abc123"));
        assert!(!debug.contains("\"password\""));
    }
}
