//! Login and signup form input.
//!
//! Both forms hold raw user input. Call `trimmed()` before validating or
//! submitting; surrounding whitespace is never significant.

use serde::Serialize;

/// Login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Create a login form from raw input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Copy of the form with every field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_owned(),
            password: self.password.trim().to_owned(),
        }
    }
}

/// Signup form input.
///
/// Serializes to the `/signUp` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Copy of the form with every field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            password: self.password.trim().to_owned(),
            confirm_password: self.confirm_password.trim().to_owned(),
        }
    }
}
