//! Shared types for the user crate.

pub mod errors;

pub use errors::{UserError, UserResult};
