//! File-backed token store.
//!
//! Stores the session in a small JSON file with restricted permissions
//! (0600 on Unix). A missing file means "signed out".

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{SessionToken, TokenStore, TokenStoreError};

/// On-disk session record.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    /// Unix timestamp when the token was saved.
    saved_at: i64,
}

/// Token store persisting to a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_restricted(&self, contents: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| TokenStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| self.io_error(e))
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let stored: StoredSession =
            serde_json::from_str(&contents).map_err(|source| TokenStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if stored.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(SessionToken::new(stored.token)))
    }

    fn save_token(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        let stored = StoredSession {
            token: token.expose().to_owned(),
            saved_at: chrono::Utc::now().timestamp(),
        };
        let contents = serde_json::to_string_pretty(&stored)?;
        self.write_restricted(&contents)?;
        tracing::debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    fn logout(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
