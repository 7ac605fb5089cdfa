//! Form field identifiers used in validation reports.

use core::fmt;

/// A user-editable field that a validation rule can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Country,
    State,
    City,
    Postcode,
    Address,
    OldPassword,
    NewPassword,
    VerificationCode,
}

impl Field {
    /// Human-readable label, as shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone number",
            Self::Password => "password",
            Self::ConfirmPassword => "password confirmation",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Postcode => "postal code",
            Self::Address => "full address",
            Self::OldPassword => "current password",
            Self::NewPassword => "new password",
            Self::VerificationCode => "verification code",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
