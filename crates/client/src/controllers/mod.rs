//! Screen controllers.
//!
//! Each controller owns the state of one flow and talks to the outside world
//! only through its [`AccountContext`](crate::AccountContext). Methods take
//! `&self` so a front end can hold a controller behind an `Arc` and fire
//! actions from event handlers; a second submit while a request is in flight
//! is rejected instead of queued.
//!
//! Every failing operation has already notified the user by the time it
//! returns `Err`; the returned error is for callers that need to branch.

mod auth;
mod home;
mod profile;

pub use auth::{AuthFlow, AuthState};
pub use home::HomeView;
pub use profile::ProfileEditor;
