//! Account backend API.
//!
//! [`AccountApi`] is the typed contract the controllers depend on;
//! [`ApiClient`] implements it over HTTP with `reqwest`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecom_account_client::{AccountApi, ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(&config.api)?;
//! let token = client.login("asha@example.in", "Abcdef1!").await?;
//! ```

mod client;
mod types;

pub use client::ApiClient;
pub use types::{ApiResponse, ProfileUpdate};

use async_trait::async_trait;
use thiserror::Error;

use ecom_account_core::{Profile, SignUpForm};

use crate::session::SessionToken;

/// Errors that can occur when talking to the account backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status code, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Parse(_) => None,
        }
    }
}

/// Typed operations of the account backend.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Exchange credentials for a session token.
    ///
    /// Returns `Ok(None)` when the server answers successfully but issues no
    /// token (rejected credentials).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    async fn login(&self, email: &str, password: &str) -> Result<Option<SessionToken>, ApiError>;

    /// Register a new account.
    ///
    /// Returns the verification code from the response, if any.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    async fn sign_up(&self, form: &SignUpForm) -> Result<Option<String>, ApiError>;

    /// Confirm an account with the code from signup.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is rejected or the request fails.
    async fn verify_user(&self, code: &str) -> Result<(), ApiError>;

    /// Fetch the signed-in user's profile.
    ///
    /// Returns `Ok(None)` when the response carries no user data.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    async fn user_details(&self, token: &SessionToken) -> Result<Option<Profile>, ApiError>;

    /// Submit profile changes, optionally including a password change.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    async fn update_profile(
        &self,
        token: &SessionToken,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError>;
}
