//! Edit-profile screen.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ecom_account_core::{ProfileField, ProfileForm};

use crate::api::ProfileUpdate;
use crate::context::AccountContext;
use crate::error::AccountError;
use crate::ui::ToastDuration;

/// Show/hide state of the three password inputs.
#[derive(Debug, Clone, Copy, Default)]
struct Visibility {
    old_password: bool,
    new_password: bool,
    confirm_password: bool,
}

impl Visibility {
    const fn slot(&mut self, field: ProfileField) -> Option<&mut bool> {
        match field {
            ProfileField::OldPassword => Some(&mut self.old_password),
            ProfileField::NewPassword => Some(&mut self.new_password),
            ProfileField::ConfirmPassword => Some(&mut self.confirm_password),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct EditorState {
    form: ProfileForm,
    loading: bool,
    visibility: Visibility,
}

/// Controller for the edit-profile screen.
///
/// Holds the form values, the in-flight flag, and the password visibility
/// toggles. Values survive failed loads and saves so the user can retry.
pub struct ProfileEditor {
    ctx: AccountContext,
    state: Mutex<EditorState>,
}

/// Clears `loading` when the save finishes or is dropped.
struct Saving<'a>(&'a Mutex<EditorState>);

impl Drop for Saving<'_> {
    fn drop(&mut self) {
        lock(self.0).loading = false;
    }
}

fn lock(state: &Mutex<EditorState>) -> MutexGuard<'_, EditorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ProfileEditor {
    /// Editor with an empty form.
    #[must_use]
    pub fn new(ctx: AccountContext) -> Self {
        Self {
            ctx,
            state: Mutex::default(),
        }
    }

    /// Snapshot of the current form values.
    #[must_use]
    pub fn form(&self) -> ProfileForm {
        lock(&self.state).form.clone()
    }

    /// Whether a save is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Whether the save action should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// Fill the form from the server.
    ///
    /// Password fields are left untouched. On failure the form keeps its
    /// current values.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Unauthenticated`] without a saved session,
    /// [`AccountError::LoadFailed`], or [`AccountError::ProfileMissing`].
    pub async fn load(&self) -> Result<(), AccountError> {
        let result = self.ctx.fetch_profile().await.map(|profile| {
            tracing::debug!("Profile loaded");
            lock(&self.state).form.populate(profile);
        });
        self.ctx.reported(result)
    }

    /// Update one field. Changing the country clears the state and swaps
    /// the list of available states.
    pub fn change_field(&self, field: ProfileField, value: impl Into<String>) {
        lock(&self.state).form.set(field, value);
    }

    /// Flip show/hide for a password field and return the new visibility.
    ///
    /// Non-password fields are always visible and are left as they are.
    pub fn toggle_visibility(&self, field: ProfileField) -> bool {
        let mut state = lock(&self.state);
        state.visibility.slot(field).is_none_or(|visible| {
            *visible = !*visible;
            *visible
        })
    }

    /// Whether a field's value is shown in clear text.
    #[must_use]
    pub fn is_visible(&self, field: ProfileField) -> bool {
        let mut visibility = lock(&self.state).visibility;
        visibility.slot(field).is_none_or(|visible| *visible)
    }

    /// Validate and submit the form.
    ///
    /// The first failing rule is reported and nothing is sent. A password
    /// change is submitted only when one of the password fields is filled.
    /// On success the user is notified and the screen is closed.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Busy`] while a save is in flight, the
    /// validation failure, [`AccountError::Unauthenticated`], or
    /// [`AccountError::SaveFailed`].
    pub async fn save(&self) -> Result<(), AccountError> {
        let result = self.try_save().await;
        self.ctx.reported(result)
    }

    async fn try_save(&self) -> Result<(), AccountError> {
        let update = {
            let mut state = lock(&self.state);
            if state.loading {
                return Err(AccountError::Busy);
            }
            state.form.validate()?;
            state.loading = true;
            ProfileUpdate::new(state.form.profile(), state.form.password())
        };
        let saving = Saving(&self.state);

        let token = self.ctx.current_token()?;
        self.ctx
            .api()
            .update_profile(&token, &update)
            .await
            .map_err(AccountError::SaveFailed)?;
        drop(saving);

        tracing::info!(
            password_changed = update.password.is_some(),
            "Profile updated"
        );
        self.ctx
            .notifier()
            .notify("Profile updated", ToastDuration::Short);
        self.ctx.navigator().go_back();
        Ok(())
    }
}
