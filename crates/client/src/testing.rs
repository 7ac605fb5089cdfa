//! Recording fakes for controller tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use ecom_account_core::{Profile, SignUpForm};

use crate::api::{AccountApi, ApiError, ProfileUpdate};
use crate::context::AccountContext;
use crate::session::{MemoryTokenStore, SessionToken, TokenStore, TokenStoreError};
use crate::ui::{Navigator, Notifier, Screen, ToastDuration};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Canned reply for one endpoint.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    /// Non-2xx response with this status.
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, ApiError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Status(status) => Err(ApiError::Status {
                status: *status,
                body: String::new(),
            }),
        }
    }
}

/// In-memory backend recording every call.
pub struct FakeApi {
    login: Mutex<Reply<Option<String>>>,
    sign_up: Mutex<Reply<Option<String>>>,
    verify: Mutex<Reply<()>>,
    details: Mutex<Reply<Option<Profile>>>,
    update: Mutex<Reply<()>>,
    calls: Mutex<Vec<&'static str>>,
    updates: Mutex<Vec<ProfileUpdate>>,
    tokens_seen: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            login: Mutex::new(Reply::Ok(None)),
            sign_up: Mutex::new(Reply::Ok(None)),
            verify: Mutex::new(Reply::Ok(())),
            details: Mutex::new(Reply::Ok(None)),
            update: Mutex::new(Reply::Ok(())),
            calls: Mutex::default(),
            updates: Mutex::default(),
            tokens_seen: Mutex::default(),
        }
    }
}

impl FakeApi {
    pub fn on_login(&self, reply: Reply<Option<String>>) {
        *lock(&self.login) = reply;
    }

    pub fn on_sign_up(&self, reply: Reply<Option<String>>) {
        *lock(&self.sign_up) = reply;
    }

    pub fn on_verify(&self, reply: Reply<()>) {
        *lock(&self.verify) = reply;
    }

    pub fn on_details(&self, reply: Reply<Option<Profile>>) {
        *lock(&self.details) = reply;
    }

    pub fn on_update(&self, reply: Reply<()>) {
        *lock(&self.update) = reply;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    pub fn updates(&self) -> Vec<ProfileUpdate> {
        lock(&self.updates).clone()
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        lock(&self.tokens_seen).clone()
    }

    fn record(&self, call: &'static str) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl AccountApi for FakeApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<Option<SessionToken>, ApiError> {
        self.record("login");
        let reply = lock(&self.login).clone();
        Ok(reply.get()?.map(SessionToken::new))
    }

    async fn sign_up(&self, _form: &SignUpForm) -> Result<Option<String>, ApiError> {
        self.record("sign_up");
        let reply = lock(&self.sign_up).clone();
        reply.get()
    }

    async fn verify_user(&self, _code: &str) -> Result<(), ApiError> {
        self.record("verify_user");
        let reply = lock(&self.verify).clone();
        reply.get()
    }

    async fn user_details(&self, token: &SessionToken) -> Result<Option<Profile>, ApiError> {
        self.record("user_details");
        lock(&self.tokens_seen).push(token.expose().to_owned());
        let reply = lock(&self.details).clone();
        reply.get()
    }

    async fn update_profile(
        &self,
        token: &SessionToken,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        self.record("update_profile");
        lock(&self.tokens_seen).push(token.expose().to_owned());
        lock(&self.updates).push(update.clone());
        // Stay in flight for one poll so overlapping submits can be observed.
        tokio::task::yield_now().await;
        let reply = lock(&self.update).clone();
        reply.get()
    }
}

/// Memory-backed token store whose reads or writes can be made to fail.
#[derive(Default)]
pub struct FaultyTokenStore {
    inner: MemoryTokenStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FaultyTokenStore {
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), TokenStoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(TokenStoreError::Io {
                path: PathBuf::from("session.json"),
                source: std::io::Error::other("storage unavailable"),
            });
        }
        Ok(())
    }
}

impl TokenStore for FaultyTokenStore {
    fn get_token(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.get_token()
    }

    fn save_token(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.save_token(token)
    }

    fn logout(&self) -> Result<(), TokenStoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.logout()
    }
}

/// Navigation event, as recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    GoTo(Screen),
    Back,
    Replace(Screen),
}

#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<Nav>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<Nav> {
        lock(&self.events).clone()
    }

    pub fn last(&self) -> Option<Nav> {
        lock(&self.events).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, screen: Screen) {
        lock(&self.events).push(Nav::GoTo(screen));
    }

    fn go_back(&self) {
        lock(&self.events).push(Nav::Back);
    }

    fn replace(&self, screen: Screen) {
        lock(&self.events).push(Nav::Replace(screen));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, ToastDuration)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages)
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    pub fn last(&self) -> Option<(String, ToastDuration)> {
        lock(&self.messages).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, duration: ToastDuration) {
        lock(&self.messages).push((message.to_owned(), duration));
    }
}

/// A context wired to fakes, with handles to inspect them.
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub tokens: Arc<FaultyTokenStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub ctx: AccountContext,
}

impl Harness {
    /// Signed-out harness.
    pub fn new() -> Self {
        Self::with_tokens(FaultyTokenStore::default())
    }

    /// Harness that starts signed in.
    pub fn signed_in() -> Self {
        Self::with_tokens(FaultyTokenStore {
            inner: MemoryTokenStore::with_token("tok-123"),
            ..FaultyTokenStore::default()
        })
    }

    fn with_tokens(tokens: FaultyTokenStore) -> Self {
        let api = Arc::new(FakeApi::default());
        let tokens = Arc::new(tokens);
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = AccountContext::new(
            api.clone(),
            tokens.clone(),
            navigator.clone(),
            notifier.clone(),
        );
        Self {
            api,
            tokens,
            navigator,
            notifier,
            ctx,
        }
    }

    pub fn saved_token(&self) -> Option<String> {
        self.tokens
            .inner
            .get_token()
            .ok()
            .flatten()
            .map(|token| token.expose().to_owned())
    }
}

/// A complete, valid Indian profile.
pub fn sample_profile() -> Profile {
    Profile {
        name: "Asha Rao".into(),
        email: "asha@example.in".into(),
        phone: "9876543210".into(),
        country: "IN".into(),
        state: "Delhi".into(),
        city: "New Delhi".into(),
        postcode: "110001".into(),
        full_address: "1 Janpath".into(),
    }
}
