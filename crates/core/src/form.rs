//! Edit-profile form state.
//!
//! [`ProfileForm`] owns the values of one edit-profile screen. It keeps the
//! state field consistent with the selected country: the available states
//! always come from the country table, and changing the country clears the
//! state.

use crate::types::{PasswordChange, Profile, ProfileField, states_for};
use crate::validation::{ValidationResult, validate_profile};

/// In-memory values of the edit-profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    profile: Profile,
    password: PasswordChange,
    available_states: &'static [&'static str],
}

impl ProfileForm {
    /// Empty form (nothing selected, no states available).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from a loaded profile.
    #[must_use]
    pub fn from_profile(profile: Profile) -> Self {
        let mut form = Self::new();
        form.populate(profile);
        form
    }

    /// Replace the profile values with a freshly loaded profile.
    ///
    /// Password fields are left as they are. The available states are
    /// derived from the loaded country; the loaded state is kept even if it
    /// is not in that list so the user sees what the server has.
    pub fn populate(&mut self, profile: Profile) {
        self.available_states = states_for(&profile.country);
        self.profile = profile;
    }

    /// Update one field.
    ///
    /// Setting [`ProfileField::Country`] also clears the state and replaces
    /// the available states with the new country's list.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Name => self.profile.name = value,
            ProfileField::Email => self.profile.email = value,
            ProfileField::Phone => self.profile.phone = value,
            ProfileField::Country => {
                self.available_states = states_for(&value);
                self.profile.country = value;
                self.profile.state.clear();
            }
            ProfileField::State => self.profile.state = value,
            ProfileField::City => self.profile.city = value,
            ProfileField::Postcode => self.profile.postcode = value,
            ProfileField::FullAddress => self.profile.full_address = value,
            ProfileField::OldPassword => self.password.old_password = value,
            ProfileField::NewPassword => self.password.new_password = value,
            ProfileField::ConfirmPassword => self.password.confirm_password = value,
        }
    }

    /// Current value of one field.
    #[must_use]
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.profile.name,
            ProfileField::Email => &self.profile.email,
            ProfileField::Phone => &self.profile.phone,
            ProfileField::Country => &self.profile.country,
            ProfileField::State => &self.profile.state,
            ProfileField::City => &self.profile.city,
            ProfileField::Postcode => &self.profile.postcode,
            ProfileField::FullAddress => &self.profile.full_address,
            ProfileField::OldPassword => &self.password.old_password,
            ProfileField::NewPassword => &self.password.new_password,
            ProfileField::ConfirmPassword => &self.password.confirm_password,
        }
    }

    /// Profile values as entered.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Password-change values as entered.
    #[must_use]
    pub const fn password(&self) -> &PasswordChange {
        &self.password
    }

    /// States selectable for the current country.
    #[must_use]
    pub const fn available_states(&self) -> &'static [&'static str] {
        self.available_states
    }

    /// Run the full edit-profile validation over the current values.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> ValidationResult {
        validate_profile(&self.profile, &self.password)
    }
}
