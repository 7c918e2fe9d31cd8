//! Internal utilities.

pub mod moderation;
pub mod validation;

pub use moderation::{can_transition, check_transition};
pub use validation::{validate_flat, validate_house};
