//! Core types for the account client.
//!
//! This module provides type-safe wrappers for the account domain concepts.

pub mod country;
pub mod credentials;
pub mod field;
pub mod profile;

pub use country::{COUNTRIES, CountryRules, country_rules, states_for};
pub use credentials::{LoginForm, SignUpForm};
pub use field::Field;
pub use profile::{PasswordChange, Profile, ProfileField};
