//! Profile and password-change types.

use core::fmt;

/// The user's stored account and address data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Country code (`IN`, `US`, ...). Empty when not selected.
    pub country: String,
    pub state: String,
    pub city: String,
    pub postcode: String,
    pub full_address: String,
}

impl Profile {
    /// Copy of the profile with every field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            country: self.country.trim().to_owned(),
            state: self.state.trim().to_owned(),
            city: self.city.trim().to_owned(),
            postcode: self.postcode.trim().to_owned(),
            full_address: self.full_address.trim().to_owned(),
        }
    }
}

/// Optional password change entered on the edit-profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    /// Whether the user started a password change (any field non-blank).
    #[must_use]
    pub fn is_requested(&self) -> bool {
        !self.old_password.trim().is_empty()
            || !self.new_password.trim().is_empty()
            || !self.confirm_password.trim().is_empty()
    }

    /// Trimmed `(old, new)` pair to submit, or `None` when no change was
    /// requested.
    #[must_use]
    pub fn submission(&self) -> Option<(String, String)> {
        self.is_requested().then(|| {
            (
                self.old_password.trim().to_owned(),
                self.new_password.trim().to_owned(),
            )
        })
    }
}

/// Keys of the edit-profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Country,
    State,
    City,
    Postcode,
    FullAddress,
    OldPassword,
    NewPassword,
    ConfirmPassword,
}

impl ProfileField {
    /// Form key as used by the front ends.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Postcode => "postcode",
            Self::FullAddress => "full_address",
            Self::OldPassword => "old_password",
            Self::NewPassword => "new_password",
            Self::ConfirmPassword => "confirm_password",
        }
    }

    /// Whether the field holds a password (masked by default).
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(
            self,
            Self::OldPassword | Self::NewPassword | Self::ConfirmPassword
        )
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_change_not_requested_when_blank() {
        let change = PasswordChange {
            old_password: "   ".into(),
            ..PasswordChange::default()
        };
        assert!(!change.is_requested());
        assert_eq!(change.submission(), None);
    }

    #[test]
    fn test_password_change_requested_by_any_field() {
        let change = PasswordChange {
            confirm_password: "x".into(),
            ..PasswordChange::default()
        };
        assert!(change.is_requested());
        assert_eq!(change.submission(), Some((String::new(), String::new())));
    }

    #[test]
    fn test_secret_fields() {
        assert!(ProfileField::OldPassword.is_secret());
        assert!(ProfileField::ConfirmPassword.is_secret());
        assert!(!ProfileField::FullAddress.is_secret());
        assert_eq!(ProfileField::FullAddress.to_string(), "full_address");
    }
}
