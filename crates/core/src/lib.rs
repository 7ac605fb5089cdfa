//! E-commerce account core - Shared types and form validation.
//!
//! This crate provides shared types used across the account workspace:
//! - `client` - API client, token storage, and the flow controllers
//! - `cli` - Terminal front end driving the controllers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no token storage. Every rule here can be evaluated before a
//! request is ever built.
//!
//! # Modules
//!
//! - [`types`] - Profile, credentials, and the country reference table
//! - [`validation`] - Field and cross-field validation rules
//! - [`form`] - Edit-profile form state with country-dependent state lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod form;
pub mod types;
pub mod validation;

pub use form::ProfileForm;
pub use types::*;
pub use validation::{ValidationError, ValidationResult};
