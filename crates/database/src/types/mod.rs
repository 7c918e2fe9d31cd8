//! Shared types and result types for the database layer

pub mod errors;

pub use errors::{DatabaseError, RepositoryError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type RepositoryResult<T> = Result<T, RepositoryError>;
