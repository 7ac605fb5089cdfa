//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ACCOUNT_API_BASE_URL` - Backend base URL
//!   (default: `https://infowarescripts.com/dev/e-commerce/api`)
//! - `ACCOUNT_API_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `ACCOUNT_TOKEN_FILE` - Session token file
//!   (default: `<data dir>/ecom-account/session.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://infowarescripts.com/dev/e-commerce/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TOKEN_DIR: &str = "ecom-account";
const TOKEN_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account backend settings
    pub api: ApiConfig,
    /// Where the session token is persisted
    pub token_file: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Account backend settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = ApiConfig::from_env()?;
        let token_file = get_optional_env("ACCOUNT_TOKEN_FILE")
            .map_or_else(default_token_file, PathBuf::from);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            api,
            token_file,
            sentry_dsn,
        })
    }
}

impl ApiConfig {
    /// Settings for `base_url` with the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("ACCOUNT_API_BASE_URL", DEFAULT_BASE_URL);
        let base_url = parse_base_url(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ACCOUNT_API_BASE_URL".to_string(), e)
        })?;

        let timeout = get_optional_env("ACCOUNT_API_TIMEOUT_SECS")
            .map_or(Ok(DEFAULT_TIMEOUT_SECS), |v| v.parse::<u64>())
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ACCOUNT_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ACCOUNT_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and check a backend base URL (http or https only).
fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme {other}")),
    }
}

/// Default token file under the platform data directory.
fn default_token_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(TOKEN_DIR)
        .join(TOKEN_FILE)
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
