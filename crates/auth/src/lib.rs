//! Authentication primitives shared by the estate backend: argon2 password
//! hashing, HS256 identity tokens and the closed set of user roles.

pub mod jwt;
pub mod password;
pub mod role;

pub use jwt::{TokenClaims, TokenError, TokenManager, DEFAULT_TOKEN_TTL};
pub use password::{PasswordError, PasswordHasher};
pub use role::{Role, RoleParseError};
