//! Login, signup, and verification flow.
//!
//! ```text
//! Anonymous | AwaitingVerification --login--> Authenticating --token--> Authenticated
//! Anonymous | AwaitingVerification --signup--> Authenticating --code--> AwaitingVerification
//! AwaitingVerification --verify--> Authenticating --ok--> Anonymous
//! Authenticated --logout--> Anonymous
//! ```
//!
//! A failed login or signup returns to `Anonymous`; a failed verification
//! returns to `AwaitingVerification`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ecom_account_core::validation::{validate_login, validate_required, validate_signup};
use ecom_account_core::{Field, LoginForm, SignUpForm, ValidationResult};

use crate::context::AccountContext;
use crate::error::{AccountError, Operation};
use crate::ui::{Screen, ToastDuration};

/// Where the user is in the authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    /// A login, signup, or verification request is in flight.
    Authenticating,
    /// Signed up, waiting for the verification code to be confirmed.
    AwaitingVerification { code: String },
    Authenticated,
}

impl AuthState {
    /// State name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::AwaitingVerification { .. } => "awaiting verification",
            Self::Authenticated => "authenticated",
        }
    }

    const fn can_authenticate(&self) -> bool {
        matches!(self, Self::Anonymous | Self::AwaitingVerification { .. })
    }
}

/// Controller for the splash, login, signup, and verify screens.
pub struct AuthFlow {
    ctx: AccountContext,
    state: Mutex<AuthState>,
}

/// An in-flight request. Dropping it without [`Attempt::finish`] moves the
/// flow to the failure state.
struct Attempt<'a> {
    state: &'a Mutex<AuthState>,
    on_failure: Option<AuthState>,
}

impl Attempt<'_> {
    fn finish(mut self, next: AuthState) {
        self.on_failure = None;
        set(self.state, next);
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if let Some(next) = self.on_failure.take() {
            set(self.state, next);
        }
    }
}

fn lock(state: &Mutex<AuthState>) -> MutexGuard<'_, AuthState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn set(state: &Mutex<AuthState>, next: AuthState) {
    let mut guard = lock(state);
    if *guard != next {
        tracing::info!(from = guard.name(), to = next.name(), "Auth state changed");
    }
    *guard = next;
}

impl AuthFlow {
    /// New flow in the `Anonymous` state.
    #[must_use]
    pub fn new(ctx: AccountContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(AuthState::Anonymous),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        lock(&self.state).clone()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *lock(&self.state) == AuthState::Authenticating
    }

    /// Decide the first screen from the saved session.
    ///
    /// Replaces the current screen with `Home` when a token is saved and
    /// with `Login` otherwise. An unreadable token store counts as signed
    /// out.
    pub fn check_session(&self) -> Screen {
        let (next, screen) = match self.ctx.current_token() {
            Ok(_) => (AuthState::Authenticated, Screen::Home),
            Err(_) => (AuthState::Anonymous, Screen::Login),
        };
        set(&self.state, next);
        tracing::info!(screen = %screen, "Session checked");
        self.ctx.navigator().replace(screen.clone());
        screen
    }

    /// Resume verification of an account signed up earlier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidTransition`] unless signed out or
    /// already verifying.
    pub fn open_verification(&self, code: impl Into<String>) -> Result<(), AccountError> {
        let mut guard = lock(&self.state);
        if !guard.can_authenticate() {
            return Err(AccountError::InvalidTransition {
                state: guard.name(),
                action: "verify",
            });
        }
        *guard = AuthState::AwaitingVerification { code: code.into() };
        Ok(())
    }

    /// Log in and save the session token.
    ///
    /// On success the token is persisted and the current screen is replaced
    /// with `Home`.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, [`AccountError::InvalidCredentials`]
    /// when no token is issued, or [`AccountError::NetworkError`].
    pub async fn login(&self, form: &LoginForm) -> Result<(), AccountError> {
        let result = self.try_login(form).await;
        self.ctx.reported(result)
    }

    async fn try_login(&self, form: &LoginForm) -> Result<(), AccountError> {
        let form = form.trimmed();
        let attempt = self.begin(
            "log in",
            AuthState::can_authenticate,
            || validate_login(&form),
            |_| AuthState::Anonymous,
        )?;

        let token = match self.ctx.api().login(&form.email, &form.password).await {
            Ok(Some(token)) => token,
            Ok(None) => return Err(AccountError::InvalidCredentials),
            Err(source) => {
                return Err(AccountError::NetworkError {
                    operation: Operation::Login,
                    source,
                });
            }
        };

        self.ctx.tokens().save_token(&token)?;
        attempt.finish(AuthState::Authenticated);
        self.ctx.navigator().replace(Screen::Home);
        Ok(())
    }

    /// Create an account.
    ///
    /// On success navigates to the verification screen pre-filled with the
    /// code from the response, and returns that code.
    ///
    /// # Errors
    ///
    /// Returns the validation failure,
    /// [`AccountError::VerificationCodeMissing`], or
    /// [`AccountError::NetworkError`].
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<String, AccountError> {
        let result = self.try_sign_up(form).await;
        self.ctx.reported(result)
    }

    async fn try_sign_up(&self, form: &SignUpForm) -> Result<String, AccountError> {
        let form = form.trimmed();
        let attempt = self.begin(
            "sign up",
            AuthState::can_authenticate,
            || validate_signup(&form),
            |_| AuthState::Anonymous,
        )?;

        let code = match self.ctx.api().sign_up(&form).await {
            Ok(Some(code)) => code,
            Ok(None) => return Err(AccountError::VerificationCodeMissing),
            Err(source) => {
                return Err(AccountError::NetworkError {
                    operation: Operation::SignUp,
                    source,
                });
            }
        };

        attempt.finish(AuthState::AwaitingVerification { code: code.clone() });
        self.ctx
            .navigator()
            .go_to(Screen::Verify { code: code.clone() });
        Ok(code)
    }

    /// Confirm the account with `code`.
    ///
    /// On success notifies the user and navigates to `Login`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank code or
    /// [`AccountError::InvalidCode`] when the backend rejects it.
    pub async fn verify(&self, code: &str) -> Result<(), AccountError> {
        let result = self.try_verify(code).await;
        self.ctx.reported(result)
    }

    async fn try_verify(&self, code: &str) -> Result<(), AccountError> {
        let code = code.trim();
        let attempt = self.begin(
            "verify",
            |state| matches!(state, AuthState::AwaitingVerification { .. }),
            || validate_required(Field::VerificationCode, code),
            AuthState::clone,
        )?;

        self.ctx
            .api()
            .verify_user(code)
            .await
            .map_err(AccountError::InvalidCode)?;

        attempt.finish(AuthState::Anonymous);
        self.ctx
            .notifier()
            .notify("Verified! You can login now", ToastDuration::Short);
        self.ctx.navigator().go_to(Screen::Login);
        Ok(())
    }

    /// Sign out and return to `Login`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidTransition`] unless authenticated, or
    /// [`AccountError::TokenStore`] if the token could not be cleared.
    pub fn logout(&self) -> Result<(), AccountError> {
        {
            let guard = lock(&self.state);
            if *guard != AuthState::Authenticated {
                return Err(AccountError::InvalidTransition {
                    state: guard.name(),
                    action: "log out",
                });
            }
        }
        set(&self.state, AuthState::Anonymous);
        let result = self.ctx.end_session();
        self.ctx.reported(result)
    }

    /// Check that `action` is allowed, validate input, and enter
    /// `Authenticating`.
    ///
    /// Nothing changes when either check fails.
    fn begin(
        &self,
        action: &'static str,
        allowed: impl FnOnce(&AuthState) -> bool,
        validate: impl FnOnce() -> ValidationResult,
        on_failure: impl FnOnce(&AuthState) -> AuthState,
    ) -> Result<Attempt<'_>, AccountError> {
        let mut guard = lock(&self.state);
        if !allowed(&*guard) {
            return Err(AccountError::InvalidTransition {
                state: guard.name(),
                action,
            });
        }
        validate()?;

        let on_failure = on_failure(&*guard);
        tracing::info!(action, from = guard.name(), "Auth request started");
        *guard = AuthState::Authenticating;
        Ok(Attempt {
            state: &self.state,
            on_failure: Some(on_failure),
        })
    }
}
