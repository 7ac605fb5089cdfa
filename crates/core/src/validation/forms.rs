//! Composite validators for whole forms.
//!
//! Rule order is part of the contract: the first failing rule is the one
//! reported to the user.

use super::{
    ValidationError, ValidationResult, validate_email, validate_password, validate_phone,
    validate_postcode, validate_required, validate_signup_phone, validate_state,
};
use crate::types::{Field, LoginForm, PasswordChange, Profile, SignUpForm};

/// Validates the login form: email and password present, then email format.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_login(form: &LoginForm) -> ValidationResult {
    let form = form.trimmed();
    validate_required(Field::Email, &form.email)?;
    validate_required(Field::Password, &form.password)?;
    validate_email(&form.email)
}

/// Validates the signup form.
///
/// Order: every field present, email format, phone format, password
/// strength, password confirmation.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_signup(form: &SignUpForm) -> ValidationResult {
    let form = form.trimmed();
    validate_required(Field::Name, &form.name)?;
    validate_required(Field::Email, &form.email)?;
    validate_required(Field::Phone, &form.phone)?;
    validate_required(Field::Password, &form.password)?;
    validate_required(Field::ConfirmPassword, &form.confirm_password)?;
    validate_email(&form.email)?;
    validate_signup_phone(&form.phone)?;
    validate_password(&form.password)?;
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validates the edit-profile form.
///
/// Fields are checked in form order: name, email, phone, country, state,
/// city, postcode, full address, then the password block. Phone, state, and
/// postcode use the rules of the selected country.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_profile(profile: &Profile, password: &PasswordChange) -> ValidationResult {
    let p = profile.trimmed();
    let country = p.country.as_str();

    validate_required(Field::Name, &p.name)?;

    validate_required(Field::Email, &p.email)?;
    validate_email(&p.email)?;

    validate_required(Field::Phone, &p.phone)?;
    validate_phone(&p.phone, country)?;

    validate_required(Field::Country, country)?;

    validate_required(Field::State, &p.state)?;
    validate_state(&p.state, country)?;

    validate_required(Field::City, &p.city)?;

    validate_required(Field::Postcode, &p.postcode)?;
    validate_postcode(&p.postcode, country)?;

    validate_required(Field::Address, &p.full_address)?;

    validate_password_change(password)
}

/// Validates the optional password change.
///
/// Only runs when a change is requested (any of the three fields non-blank).
/// Then all three are required, the new password must be strong, match its
/// confirmation, and differ from the current password, in that order.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_password_change(change: &PasswordChange) -> ValidationResult {
    if !change.is_requested() {
        return Ok(());
    }

    let old = change.old_password.trim();
    let new = change.new_password.trim();
    let confirm = change.confirm_password.trim();

    validate_required(Field::OldPassword, old)?;
    validate_required(Field::NewPassword, new)?;
    validate_required(Field::ConfirmPassword, confirm)?;
    validate_password(new)?;

    if new != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if new == old {
        return Err(ValidationError::PasswordUnchanged);
    }
    Ok(())
}
