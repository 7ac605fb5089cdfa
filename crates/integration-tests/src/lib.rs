//! Integration tests for the e-commerce account client.
//!
//! Every test runs the real [`ApiClient`] against a `wiremock` server and
//! keeps its session in a temporary [`FileTokenStore`], so no network or
//! user data directory is touched.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ecom-account-integration-tests
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

use ecom_account_client::{
    AccountContext, ApiClient, ApiConfig, FileTokenStore, Navigator, Notifier, Screen,
    SessionToken, ToastDuration, TokenStore,
};

/// Path prefix the mock backend is mounted under.
pub const API_PREFIX: &str = "/dev/e-commerce/api";

/// Navigation call, as recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    GoTo(Screen),
    Back,
    Replace(Screen),
}

/// Navigator that records every call.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<Nav>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<Nav> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, nav: Nav) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(nav);
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, screen: Screen) {
        self.push(Nav::GoTo(screen));
    }

    fn go_back(&self) {
        self.push(Nav::Back);
    }

    fn replace(&self, screen: Screen) {
        self.push(Nav::Replace(screen));
    }
}

/// Notifier that records every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, ToastDuration)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, duration: ToastDuration) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_owned(), duration));
    }
}

/// A mock backend plus a context wired to it.
pub struct TestApp {
    pub server: MockServer,
    pub api: ApiClient,
    pub tokens: Arc<FileTokenStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub ctx: AccountContext,
    _dir: TempDir,
}

impl TestApp {
    /// Start a mock server and a signed-out client.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or HTTP client cannot be created.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("Failed to create temp dir");

        let base_url = Url::parse(&format!("{}{API_PREFIX}/", server.uri()))
            .expect("Mock server URI is a valid URL");
        let api = ApiClient::new(&ApiConfig::new(base_url)).expect("Failed to build API client");

        let tokens = Arc::new(FileTokenStore::new(dir.path().join("session.json")));
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = AccountContext::new(
            Arc::new(api.clone()),
            tokens.clone(),
            navigator.clone(),
            notifier.clone(),
        );

        Self {
            server,
            api,
            tokens,
            navigator,
            notifier,
            ctx,
            _dir: dir,
        }
    }

    /// Full path of an endpoint on the mock server.
    #[must_use]
    pub fn path(endpoint: &str) -> String {
        format!("{API_PREFIX}/{endpoint}")
    }

    /// Save `token` as if a previous run had logged in.
    ///
    /// # Panics
    ///
    /// Panics if the token file cannot be written.
    pub fn sign_in(&self, token: &str) {
        self.tokens
            .save_token(&SessionToken::new(token))
            .expect("Failed to save token");
    }

    /// The token currently on disk.
    ///
    /// # Panics
    ///
    /// Panics if the token file exists but cannot be read.
    #[must_use]
    pub fn saved_token(&self) -> Option<String> {
        self.tokens
            .get_token()
            .expect("Failed to read token")
            .map(|token| token.expose().to_owned())
    }

    /// Bodies of every request the mock server received, as text.
    ///
    /// # Panics
    ///
    /// Panics if request recording is disabled.
    pub async fn request_bodies(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .expect("Request recording is enabled")
            .iter()
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }
}
