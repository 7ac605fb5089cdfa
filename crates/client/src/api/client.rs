//! HTTP implementation of [`AccountApi`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};

use ecom_account_core::{Profile, SignUpForm};

use super::types::{ApiResponse, LoginResult, SignUpResult, UserDetailsResult, extract_result};
use super::{AccountApi, ApiError, ProfileUpdate};
use crate::config::ApiConfig;
use crate::session::SessionToken;

/// Client for the account backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ecom-account/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            }),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON body to `path`, attaching `token` as a bearer header.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        token: Option<&SessionToken>,
    ) -> Result<ApiResponse, ApiError> {
        tracing::debug!(path, "POST (json)");

        let mut request = self.inner.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.bearer());
        }

        read_response(request.send().await?).await
    }

    /// POST a multipart form to `path`, attaching `token` as a bearer header.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<(&'static str, String)>,
        token: Option<&SessionToken>,
    ) -> Result<ApiResponse, ApiError> {
        tracing::debug!(path, fields = fields.len(), "POST (multipart)");

        let form = fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });

        let mut request = self.inner.client.post(self.url(path)).multipart(form);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.bearer());
        }

        read_response(request.send().await?).await
    }
}

/// Turn a response into [`ApiResponse`], rejecting non-2xx statuses.
///
/// An empty or non-JSON body becomes `Value::Null`.
async fn read_response(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            body = %text.chars().take(500).collect::<String>(),
            "Account API request failed"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    let data = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Response body is not JSON");
            Value::Null
        })
    };

    Ok(ApiResponse {
        status: status.as_u16(),
        data,
    })
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<Option<SessionToken>, ApiError> {
        let body = json!({ "params": { "email": email, "password": password } });
        let response = self.post("auth/login", &body, None).await?;

        let token = extract_result::<LoginResult>(response.data)
            .map(|result| result.token)
            .filter(|token| !token.is_empty())
            .map(SessionToken::new);
        Ok(token)
    }

    async fn sign_up(&self, form: &SignUpForm) -> Result<Option<String>, ApiError> {
        let body = serde_json::to_value(form)?;
        let response = self.post("signUp", &body, None).await?;

        let code = extract_result::<SignUpResult>(response.data)
            .and_then(|result| result.status)
            .map(|status| status.code)
            .filter(|code| !code.is_empty());
        Ok(code)
    }

    async fn verify_user(&self, code: &str) -> Result<(), ApiError> {
        let body = json!({ "params": { "random": code } });
        self.post("verifyUser", &body, None).await?;
        Ok(())
    }

    async fn user_details(&self, token: &SessionToken) -> Result<Option<Profile>, ApiError> {
        let response = self.post("user-details", &json!({}), Some(token)).await?;

        let profile = extract_result::<UserDetailsResult>(response.data)
            .and_then(|result| result.user_data)
            .map(Profile::from);
        Ok(profile)
    }

    async fn update_profile(
        &self,
        token: &SessionToken,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        self.post_multipart("edit-profile", update.form_fields(), Some(token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = client("https://example.com/dev/e-commerce/api/");
        assert_eq!(api.base_url(), "https://example.com/dev/e-commerce/api");
        assert_eq!(
            api.url("auth/login"),
            "https://example.com/dev/e-commerce/api/auth/login"
        );
        assert_eq!(
            api.url("/signUp"),
            "https://example.com/dev/e-commerce/api/signUp"
        );
    }

    #[test]
    fn test_extract_result_from_null() {
        assert!(extract_result::<LoginResult>(Value::Null).is_none());
    }

    #[test]
    fn test_extract_result_with_token() {
        let data = json!({ "result": { "token": "abc" } });
        let result = extract_result::<LoginResult>(data).unwrap();
        assert_eq!(result.token, "abc");
    }

    #[test]
    fn test_extract_user_data_missing() {
        let data = json!({ "result": { "message": "no user" } });
        let result = extract_result::<UserDetailsResult>(data).unwrap();
        assert!(result.user_data.is_none());
    }
}
