//! Account flow error taxonomy.
//!
//! Every controller operation returns `Result<T, AccountError>`. Each error
//! also carries the message shown to the user, so front ends never need to
//! inspect lower-level HTTP or storage errors.

use thiserror::Error;

use ecom_account_core::ValidationError;

use crate::api::ApiError;
use crate::session::TokenStoreError;
use crate::ui::ToastDuration;

/// Request whose transport failure is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    SignUp,
}

impl Operation {
    const fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::SignUp => "Signup failed",
        }
    }
}

/// Errors surfaced by the account flows.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Input rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No session token is available.
    #[error("not signed in")]
    Unauthenticated,

    /// Login succeeded at the HTTP level but no token was issued.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Signup response did not include a verification code.
    #[error("verification code missing from signup response")]
    VerificationCodeMissing,

    /// The backend rejected the verification code.
    #[error("verification failed: {0}")]
    InvalidCode(#[source] ApiError),

    /// The profile request failed in transport or on the server.
    #[error("failed to load profile: {0}")]
    LoadFailed(#[source] ApiError),

    /// The profile response contained no user data.
    #[error("profile response contained no user data")]
    ProfileMissing,

    /// The profile update was rejected or did not reach the server.
    #[error("failed to save profile: {0}")]
    SaveFailed(#[source] ApiError),

    /// A login or signup request failed in transport or on the server.
    #[error("{operation:?} request failed: {source}")]
    NetworkError {
        operation: Operation,
        #[source]
        source: ApiError,
    },

    /// A request from this form is already in flight.
    #[error("a request is already in progress")]
    Busy,

    /// The action is not available in the current flow state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// The session token could not be read or written.
    #[error("session storage error: {0}")]
    TokenStore(#[from] TokenStoreError),
}

impl AccountError {
    /// Message shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Unauthenticated => "Please log in again",
            Self::InvalidCredentials => "Invalid credentials",
            Self::VerificationCodeMissing => "Verification code missing",
            Self::InvalidCode(_) => "Invalid code",
            Self::LoadFailed(_) | Self::ProfileMissing => "Failed to load profile",
            Self::SaveFailed(_) => "Failed to update profile",
            Self::NetworkError { operation, .. } => operation.failure_message(),
            Self::Busy => "Please wait, a request is already in progress",
            Self::InvalidTransition { .. } => "This action is not available right now",
            Self::TokenStore(_) => "Could not access the saved session",
        }
    }

    /// How long the notification for this error should stay visible.
    #[must_use]
    pub const fn toast_duration(&self) -> ToastDuration {
        match self {
            Self::Validation(err) if err.is_verbose() => ToastDuration::Long,
            _ => ToastDuration::Short,
        }
    }

    /// Whether the user is shown a notification for this error.
    ///
    /// `Busy` and `InvalidTransition` are only logged: the front end should
    /// not have offered the action.
    #[must_use]
    pub const fn is_notified(&self) -> bool {
        !matches!(self, Self::Busy | Self::InvalidTransition { .. })
    }

    /// Whether the error was raised locally, before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Busy | Self::InvalidTransition { .. }
        )
    }
}
