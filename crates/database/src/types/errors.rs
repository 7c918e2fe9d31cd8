//! Error types for the database layer

use thiserror::Error;

/// Failures while opening or migrating the database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Failures reported by repository operations.
///
/// The services above the repositories only ever see these variants, never
/// raw driver errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("referenced {0} does not exist")]
    MissingReference(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Classify a driver error raised while working on `entity`.
    ///
    /// `reference` names the parent entity of a foreign key, if any.
    pub fn from_sqlx(entity: &str, reference: &str, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound(entity.to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                if db_err.is_unique_violation() || message.contains("UNIQUE constraint failed") {
                    RepositoryError::Conflict(entity.to_string())
                } else if db_err.is_foreign_key_violation()
                    || message.contains("FOREIGN KEY constraint failed")
                {
                    RepositoryError::MissingReference(reference.to_string())
                } else {
                    RepositoryError::Storage(message.to_string())
                }
            }
            other => RepositoryError::Storage(other.to_string()),
        }
    }
}
