//! Collaborators shared by the account controllers.

use std::sync::Arc;

use ecom_account_core::Profile;

use crate::api::AccountApi;
use crate::error::AccountError;
use crate::session::{SessionToken, TokenStore};
use crate::ui::{Navigator, Notifier, Screen};

/// Services every controller works through.
///
/// This struct is cheaply cloneable via `Arc`; several controllers can be
/// built from one context.
#[derive(Clone)]
pub struct AccountContext {
    inner: Arc<AccountContextInner>,
}

struct AccountContextInner {
    api: Arc<dyn AccountApi>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl AccountContext {
    /// Create a context from its collaborators.
    #[must_use]
    pub fn new(
        api: Arc<dyn AccountApi>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AccountContextInner {
                api,
                tokens,
                navigator,
                notifier,
            }),
        }
    }

    /// Get a reference to the account API.
    #[must_use]
    pub fn api(&self) -> &dyn AccountApi {
        self.inner.api.as_ref()
    }

    /// Get a reference to the token store.
    #[must_use]
    pub fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    /// Get a reference to the navigator.
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.inner.navigator.as_ref()
    }

    /// Get a reference to the notifier.
    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    /// Log `err` and show it to the user when [`AccountError::is_notified`].
    pub(crate) fn report(&self, err: &AccountError) {
        if !err.is_notified() {
            tracing::debug!(error = %err, "Action ignored");
            return;
        }
        if err.is_local() {
            tracing::debug!(error = %err, "Rejected locally");
        } else {
            tracing::warn!(error = %err, "Account request failed");
        }
        self.notifier()
            .notify(err.user_message(), err.toast_duration());
    }

    /// Report the error of `result`, if any, and pass it through.
    pub(crate) fn reported<T>(&self, result: Result<T, AccountError>) -> Result<T, AccountError> {
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// The saved session token.
    ///
    /// A token store read failure counts as signed out.
    pub(crate) fn current_token(&self) -> Result<SessionToken, AccountError> {
        match self.tokens().get_token() {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(AccountError::Unauthenticated),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                Err(AccountError::Unauthenticated)
            }
        }
    }

    /// Load the signed-in user's profile.
    pub(crate) async fn fetch_profile(&self) -> Result<Profile, AccountError> {
        let token = self.current_token()?;
        match self.api().user_details(&token).await {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => Err(AccountError::ProfileMissing),
            Err(e) => Err(AccountError::LoadFailed(e)),
        }
    }

    /// Clear the saved session and go to the login screen.
    ///
    /// The navigation happens even when clearing the store fails.
    pub(crate) fn end_session(&self) -> Result<(), AccountError> {
        let cleared = self.tokens().logout();
        self.navigator().replace(Screen::Login);
        cleared.map_err(AccountError::from)?;
        tracing::info!("Signed out");
        Ok(())
    }
}
