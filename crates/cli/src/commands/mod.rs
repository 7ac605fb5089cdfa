//! Subcommand implementations.

pub mod auth;
pub mod profile;

use std::sync::Arc;

use thiserror::Error;

use ecom_account_client::{
    AccountContext, AccountError, ApiClient, ApiError, ClientConfig, FileTokenStore, Screen,
};

use crate::terminal::{TerminalNavigator, TerminalNotifier};

/// Errors that can occur while running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The HTTP client could not be set up.
    #[error("Failed to create API client: {0}")]
    Client(#[from] ApiError),

    /// An account flow failed.
    #[error("{}", .0.user_message())]
    Account(#[from] AccountError),
}

impl CommandError {
    /// Whether the failure was already shown through the notifier.
    pub const fn is_notified(&self) -> bool {
        match self {
            Self::Client(_) => false,
            Self::Account(err) => err.is_notified(),
        }
    }
}

/// Controllers' collaborators for one CLI run.
pub struct App {
    pub ctx: AccountContext,
    navigator: Arc<TerminalNavigator>,
}

impl App {
    /// Screen the app would be showing now.
    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }
}

/// Wire the HTTP client, token file, and terminal signals together.
pub fn app(config: &ClientConfig) -> Result<App, CommandError> {
    let api = ApiClient::new(&config.api)?;
    tracing::debug!(
        base_url = api.base_url(),
        token_file = %config.token_file.display(),
        "Client configured"
    );

    let navigator = Arc::new(TerminalNavigator::new());
    let ctx = AccountContext::new(
        Arc::new(api),
        Arc::new(FileTokenStore::new(&config.token_file)),
        navigator.clone(),
        Arc::new(TerminalNotifier),
    );

    Ok(App { ctx, navigator })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notified_account_errors() {
        assert!(CommandError::from(AccountError::InvalidCredentials).is_notified());
        assert!(!CommandError::from(AccountError::Busy).is_notified());
        assert!(
            !CommandError::from(ApiError::Status {
                status: 500,
                body: String::new(),
            })
            .is_notified()
        );
    }
}
