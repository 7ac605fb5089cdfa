//! In-memory token store for ephemeral sessions and tests.

use std::sync::{Mutex, PoisonError};

use super::{SessionToken, TokenStore, TokenStoreError};

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemoryTokenStore {
    /// Empty (signed out) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts signed in with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SessionToken::new(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        let guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save_token(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.clone());
        Ok(())
    }

    fn logout(&self) -> Result<(), TokenStoreError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}
