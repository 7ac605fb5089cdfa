//! Session token storage.
//!
//! The backend hands out an opaque token at login. It is kept in a
//! [`TokenStore`] so later runs start signed in, attached to every
//! authenticated request, and cleared on logout.

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use std::fmt;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Opaque credential proving authentication.
///
/// Implements `Debug` manually so the token never ends up in logs.
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for building request headers and persisting.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// `Authorization` header value expected by the backend.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("bearer {}", self.expose())
    }
}

impl Clone for SessionToken {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Errors that can occur while reading or writing the stored token.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Filesystem operation failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored session could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The session could not be serialized.
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistent home of the session token.
pub trait TokenStore: Send + Sync {
    /// The saved token, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_token(&self) -> Result<Option<SessionToken>, TokenStoreError>;

    /// Persist a token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save_token(&self, token: &SessionToken) -> Result<(), TokenStoreError>;

    /// Forget the saved token. Succeeds when nothing is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    fn logout(&self) -> Result<(), TokenStoreError>;
}
