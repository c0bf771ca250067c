//! Configuration types: built once from the environment, passed explicitly
//! into collaborators at construction. No ambient globals: the report core
//! never reads configuration itself.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::report::processor::DEFAULT_MAX_DOCUMENT_CHARS;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Maximum accepted document length, in characters.
    pub max_document_chars: usize,
    /// Alert queue endpoint.
    pub queue: QueueConfig,
    /// Document store. Without one, only direct upload works.
    pub store: Option<StoreConfig>,
}

/// Alert queue endpoint configuration.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// URL messages are POSTed to.
    pub url: String,
    /// Bearer token, if the queue requires one.
    pub auth_token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Object-store configuration for stored-document submissions.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store base URL (documents live at `{base_url}/{bucket}/{key}`).
    pub base_url: String,
    /// Bucket holding the clinic's report documents.
    pub bucket: String,
    /// Bearer token, if the store requires one.
    pub auth_token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// `SKYVITALS_QUEUE_URL` is required; everything else has defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_var("SKYVITALS_PORT", 8080)?,
            max_document_chars: parse_var(
                "SKYVITALS_MAX_DOCUMENT_CHARS",
                DEFAULT_MAX_DOCUMENT_CHARS,
            )?,
            queue: QueueConfig::from_env()?,
            store: StoreConfig::from_env()?,
        })
    }
}

impl QueueConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("SKYVITALS_QUEUE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("SKYVITALS_QUEUE_URL".into()))?;

        Ok(Self {
            url,
            auth_token: std::env::var("SKYVITALS_QUEUE_TOKEN")
                .ok()
                .map(SecretString::from),
            timeout: Duration::from_secs(parse_var("SKYVITALS_QUEUE_TIMEOUT_SECS", 10u64)?),
        })
    }
}

impl StoreConfig {
    /// Returns `None` when no store URL is configured; stored-document
    /// submission is then disabled.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(base_url) = std::env::var("SKYVITALS_STORE_URL") else {
            return Ok(None);
        };

        Ok(Some(Self {
            base_url,
            bucket: std::env::var("SKYVITALS_STORE_BUCKET")
                .unwrap_or_else(|_| "health-reports".to_string()),
            auth_token: std::env::var("SKYVITALS_STORE_TOKEN")
                .ok()
                .map(SecretString::from),
            timeout: Duration::from_secs(parse_var("SKYVITALS_STORE_TIMEOUT_SECS", 10u64)?),
        }))
    }
}

/// Read an env var, falling back to `default` when unset and failing
/// loudly when set but unparsable.
fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("cannot parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}
