//! Home screen: read-only profile view.

use std::sync::{Mutex, PoisonError};

use ecom_account_core::Profile;

use crate::context::AccountContext;
use crate::error::AccountError;
use crate::ui::Screen;

/// Controller for the home screen.
pub struct HomeView {
    ctx: AccountContext,
    profile: Mutex<Option<Profile>>,
}

impl HomeView {
    #[must_use]
    pub fn new(ctx: AccountContext) -> Self {
        Self {
            ctx,
            profile: Mutex::new(None),
        }
    }

    /// Profile from the last successful refresh.
    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reload the profile. Call whenever the screen comes into focus.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Unauthenticated`] without a saved session,
    /// [`AccountError::LoadFailed`], or [`AccountError::ProfileMissing`].
    /// The previous profile stays on screen.
    pub async fn refresh(&self) -> Result<Profile, AccountError> {
        let result = self.ctx.fetch_profile().await.inspect(|profile| {
            *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        });
        self.ctx.reported(result)
    }

    /// Open the edit-profile screen.
    pub fn edit_profile(&self) {
        self.ctx.navigator().go_to(Screen::EditProfile);
    }

    /// Sign out and replace the screen with `Login`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::TokenStore`] if the token could not be
    /// cleared; the navigation still happens.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let result = self.ctx.end_session();
        self.ctx.reported(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::{Harness, Nav, Reply, sample_profile};

    #[tokio::test]
    async fn test_refresh_shows_profile() {
        let h = Harness::signed_in();
        h.api.on_details(Reply::Ok(Some(sample_profile())));
        let home = HomeView::new(h.ctx.clone());

        let profile = home.refresh().await.unwrap();

        assert_eq!(profile.name, "Asha Rao");
        assert_eq!(home.profile(), Some(sample_profile()));
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_profile() {
        let h = Harness::signed_in();
        h.api.on_details(Reply::Ok(Some(sample_profile())));
        let home = HomeView::new(h.ctx.clone());
        home.refresh().await.unwrap();

        h.api.on_details(Reply::Status(503));
        let err = home.refresh().await.unwrap_err();

        assert!(matches!(
            err,
            AccountError::LoadFailed(ApiError::Status { status: 503, .. })
        ));
        assert_eq!(home.profile(), Some(sample_profile()));
        assert_eq!(h.api.calls(), ["user_details", "user_details"]);
    }

    #[tokio::test]
    async fn test_refresh_with_unreadable_store_is_unauthenticated() {
        let h = Harness::signed_in();
        h.api.on_details(Reply::Ok(Some(sample_profile())));
        h.tokens.fail_reads();
        let home = HomeView::new(h.ctx.clone());

        let err = home.refresh().await.unwrap_err();

        assert!(matches!(err, AccountError::Unauthenticated));
        assert!(h.api.calls().is_empty());
        assert_eq!(home.profile(), None);
    }

    #[test]
    fn test_edit_profile_navigates() {
        let h = Harness::signed_in();
        HomeView::new(h.ctx.clone()).edit_profile();
        assert_eq!(h.navigator.events(), [Nav::GoTo(Screen::EditProfile)]);
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_profile() {
        let h = Harness::signed_in();
        h.api.on_details(Reply::Ok(Some(sample_profile())));
        let home = HomeView::new(h.ctx.clone());
        home.refresh().await.unwrap();

        home.logout().unwrap();

        assert_eq!(h.saved_token(), None);
        assert_eq!(home.profile(), None);
        assert_eq!(h.navigator.last(), Some(Nav::Replace(Screen::Login)));
    }
}
