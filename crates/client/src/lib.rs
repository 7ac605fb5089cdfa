//! E-commerce account client - API access, session storage, and controllers.
//!
//! # Architecture
//!
//! - [`api`] talks to the account backend over HTTP (`reqwest`)
//! - [`session`] persists the session token between runs
//! - [`ui`] defines the navigation and notification signals a front end
//!   must handle
//! - [`controllers`] implement the login, signup, verification, home, and
//!   edit-profile flows on top of those collaborators
//!
//! Controllers never perform I/O directly: every request and every token
//! read goes through the collaborators held by an [`AccountContext`], so the
//! flows run unchanged against a fake backend in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ecom_account_client::{AccountContext, ApiClient, ClientConfig, FileTokenStore};
//! use ecom_account_client::controllers::AuthFlow;
//!
//! let config = ClientConfig::from_env()?;
//! let ctx = AccountContext::new(
//!     Arc::new(ApiClient::new(&config.api)?),
//!     Arc::new(FileTokenStore::new(&config.token_file)),
//!     navigator,
//!     notifier,
//! );
//!
//! let auth = AuthFlow::new(ctx);
//! auth.check_session();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod context;
pub mod controllers;
pub mod error;
pub mod session;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{AccountApi, ApiClient, ApiError, ProfileUpdate};
pub use config::{ApiConfig, ClientConfig, ConfigError};
pub use context::AccountContext;
pub use error::{AccountError, Operation};
pub use session::{FileTokenStore, MemoryTokenStore, SessionToken, TokenStore, TokenStoreError};
pub use ui::{Navigator, Notifier, Screen, ToastDuration};
