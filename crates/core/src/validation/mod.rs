//! Field validation rules.
//!
//! Every rule is a pure function over raw string input. Callers trim input
//! first (see the `trimmed()` helpers on the form types). The composite
//! validators in [`forms`] run rules in a fixed order and stop at the first
//! failure; errors are never aggregated.

mod forms;

pub use forms::{validate_login, validate_password_change, validate_profile, validate_signup};

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::country::is_ten_digit_phone;
use crate::types::{Field, country_rules};

/// `local@domain.tld`: no whitespace, one `@`, at least one `.` after it.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Characters that satisfy the "special character" password requirement.
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&#";

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A rejected form input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is blank.
    #[error("missing required field: {0}")]
    MissingField(Field),

    /// A field does not match its expected format.
    #[error("invalid {0} format")]
    InvalidFormat(Field),

    /// The password does not meet the complexity rules.
    #[error("password does not meet complexity requirements")]
    WeakPassword,

    /// New password and confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// New password equals the current one.
    #[error("new password is the same as the current password")]
    PasswordUnchanged,
}

impl ValidationError {
    /// Message shown to the user for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField(field) => match field {
                Field::Name => "Please enter your name",
                Field::Email => "Please enter your email",
                Field::Phone => "Please enter your phone number",
                Field::Password => "Please enter your password",
                Field::ConfirmPassword => "Please confirm your password",
                Field::Country => "Please select your country",
                Field::State => "Please select your state",
                Field::City => "Please enter your city",
                Field::Postcode => "Please enter your postal code",
                Field::Address => "Please enter your full address",
                Field::OldPassword => "Enter your current password",
                Field::NewPassword => "Enter new password",
                Field::VerificationCode => "Please enter a code",
            },
            Self::InvalidFormat(field) => match field {
                Field::Email => "Invalid email format",
                Field::Phone => "Invalid phone number",
                Field::Postcode => "Invalid postal code",
                Field::State => "Please select a valid state",
                Field::Country => "Please select a valid country",
                _ => "Invalid input",
            },
            Self::WeakPassword => {
                "Password must be 8+ chars, include uppercase, lowercase, number & special char"
            }
            Self::PasswordMismatch => "Passwords do not match",
            Self::PasswordUnchanged => "New password cannot be same as old password",
        }
    }

    /// Whether the message is long enough to warrant a longer notification.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        matches!(self, Self::WeakPassword)
    }
}

/// Result of a validation rule.
pub type ValidationResult = Result<(), ValidationError>;

/// Fails with `MissingField(field)` if `value` is blank after trimming.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for blank input.
pub fn validate_required(field: Field, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Validates `local@domain.tld` shape.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] for anything that is not an
/// email address, including empty input.
pub fn validate_email(value: &str) -> ValidationResult {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(Field::Email))
    }
}

/// Validates a phone number for the selected country.
///
/// India requires 10 digits starting with 6-9, the US 10 digits. Other or
/// missing countries only require a non-empty value.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] if the number is rejected.
pub fn validate_phone(value: &str, country: &str) -> ValidationResult {
    let accepted = country_rules(country)
        .map_or_else(|| !value.is_empty(), |rules| rules.accepts_phone(value));
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(Field::Phone))
    }
}

/// Validates the phone number on the signup form, which has no country
/// selector: exactly ten digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] if the number is rejected.
pub fn validate_signup_phone(value: &str) -> ValidationResult {
    if is_ten_digit_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(Field::Phone))
    }
}

/// Validates a postal code for the selected country.
///
/// India requires exactly 6 digits, the US `12345` or `12345-6789`. Other or
/// missing countries only require a non-empty value.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] if the code is rejected.
pub fn validate_postcode(value: &str, country: &str) -> ValidationResult {
    let accepted = country_rules(country)
        .map_or_else(|| !value.is_empty(), |rules| rules.accepts_postcode(value));
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(Field::Postcode))
    }
}

/// Validates that `value` is one of the selected country's states.
///
/// Countries outside the reference table accept any state.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] if the state is not listed.
pub fn validate_state(value: &str, country: &str) -> ValidationResult {
    match country_rules(country) {
        Some(rules) if !rules.has_state(value) => Err(ValidationError::InvalidFormat(Field::State)),
        _ => Ok(()),
    }
}

/// Validates password complexity.
///
/// Requires at least [`MIN_PASSWORD_LENGTH`] characters, drawn only from
/// ASCII letters, digits, and [`PASSWORD_SPECIAL_CHARS`], with at least one
/// lowercase letter, uppercase letter, digit, and special character.
///
/// # Errors
///
/// Returns [`ValidationError::WeakPassword`] if any requirement fails.
pub fn validate_password(value: &str) -> ValidationResult {
    let is_special = |c: char| PASSWORD_SPECIAL_CHARS.contains(c);

    let strong = value.chars().count() >= MIN_PASSWORD_LENGTH
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_special(c))
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(is_special);

    if strong {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(
            validate_required(Field::City, "  \t"),
            Err(ValidationError::MissingField(Field::City))
        );
        assert_eq!(validate_required(Field::City, " Pune "), Ok(()));
    }

    #[test]
    fn test_email_rejects_anything_off_pattern() {
        for input in ["", "plain", "a@b", "a b@c.d", "a@b c.d", "@b.c", "a@.c"] {
            assert_eq!(
                validate_email(input),
                Err(ValidationError::InvalidFormat(Field::Email)),
                "{input:?}"
            );
        }
        assert_eq!(validate_email("shopper@example.in"), Ok(()));
    }

    #[test]
    fn test_email_accepts_any_matching_address() {
        for input in ["user+tag@example.com", "user.name@sub.example.co.uk", "a@b.c"] {
            assert_eq!(validate_email(input), Ok(()), "{input:?}");
        }
        assert!(validate_email("user@@domain.com").is_err());

        let long = format!("{}@example.com", "a".repeat(300));
        assert_eq!(validate_email(&long), Ok(()));
    }

    #[test]
    fn test_india_phone() {
        assert_eq!(validate_phone("9876543210", "IN"), Ok(()));
        assert_eq!(
            validate_phone("1234567890", "IN"),
            Err(ValidationError::InvalidFormat(Field::Phone))
        );
        assert_eq!(
            validate_phone("98765 43210", "IN"),
            Err(ValidationError::InvalidFormat(Field::Phone))
        );
    }

    #[test]
    fn test_us_phone_allows_any_leading_digit() {
        assert_eq!(validate_phone("1234567890", "US"), Ok(()));
        assert_eq!(
            validate_phone("123456789", "US"),
            Err(ValidationError::InvalidFormat(Field::Phone))
        );
    }

    #[test]
    fn test_default_phone_only_needs_a_value() {
        assert_eq!(validate_phone("+44 20 7946 0958", "GB"), Ok(()));
        assert_eq!(validate_phone("12", ""), Ok(()));
        assert_eq!(
            validate_phone("", "GB"),
            Err(ValidationError::InvalidFormat(Field::Phone))
        );
    }

    #[test]
    fn test_signup_phone() {
        assert_eq!(validate_signup_phone("1234567890"), Ok(()));
        assert_eq!(
            validate_signup_phone("12345abcde"),
            Err(ValidationError::InvalidFormat(Field::Phone))
        );
    }

    #[test]
    fn test_postcode_by_country() {
        assert_eq!(validate_postcode("700001", "IN"), Ok(()));
        assert_eq!(
            validate_postcode("70001", "IN"),
            Err(ValidationError::InvalidFormat(Field::Postcode))
        );
        assert_eq!(validate_postcode("10001", "US"), Ok(()));
        assert_eq!(validate_postcode("10001-0001", "US"), Ok(()));
        assert_eq!(
            validate_postcode("700001", "US"),
            Err(ValidationError::InvalidFormat(Field::Postcode))
        );
        assert_eq!(validate_postcode("SW1A 1AA", "GB"), Ok(()));
    }

    #[test]
    fn test_state_must_belong_to_country() {
        assert_eq!(validate_state("Karnataka", "IN"), Ok(()));
        assert_eq!(
            validate_state("Texas", "IN"),
            Err(ValidationError::InvalidFormat(Field::State))
        );
        assert_eq!(validate_state("Bavaria", "DE"), Ok(()));
    }

    #[test]
    fn test_password_complexity() {
        assert_eq!(validate_password("Abcdef1!"), Ok(()));
        assert_eq!(validate_password("Str0ng#Passw0rd"), Ok(()));
        for weak in [
            "abcdef12",  // no uppercase, no special
            "ABCDEF1!",  // no lowercase
            "Abcdefg!",  // no digit
            "Abcdefg1",  // no special
            "Abc1!",     // too short
            "Abcdef1!^", // character outside the allowed set
            "Abcdef1! ", // whitespace
            "Äbcdef1!",  // non-ASCII letter
        ] {
            assert_eq!(
                validate_password(weak),
                Err(ValidationError::WeakPassword),
                "{weak:?}"
            );
        }
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ValidationError::InvalidFormat(Field::Email).user_message(),
            "Invalid email format"
        );
        assert_eq!(
            ValidationError::MissingField(Field::VerificationCode).user_message(),
            "Please enter a code"
        );
        assert!(ValidationError::WeakPassword.is_verbose());
        assert!(!ValidationError::PasswordMismatch.is_verbose());
    }
}
