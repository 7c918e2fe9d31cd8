//! Internal utilities.

pub mod validation;

pub use validation::{validate_email, validate_password};
