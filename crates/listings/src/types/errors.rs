//! Error types for house and flat operations.

use estate_database::RepositoryError;
use thiserror::Error;

/// Result type alias for listing operations
pub type ListingResult<T> = Result<T, ListingError>;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("House not found: {id}")]
    HouseNotFound { id: i64 },

    #[error("Flat not found: {id}")]
    FlatNotFound { id: i64 },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl ListingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidStatusTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn storage(err: RepositoryError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}
