//! Error types for user registration and login.

use estate_auth::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid role `{0}`")]
    InvalidRole(String),

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type UserResult<T> = Result<T, UserError>;
