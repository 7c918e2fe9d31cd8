//! Password hashing and verification.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher as _,
        PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use estate_config::PasswordHashConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid hashing parameters: {0}")]
    InvalidParameters(String),
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
    #[error("stored password hash is malformed")]
    InvalidHashFormat,
    #[error("password does not match")]
    Mismatch,
}

/// Argon2id hasher with a configurable work factor.
///
/// Digests are PHC strings, so the salt and the parameters used at hashing
/// time travel with the digest and verification needs nothing else.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordError::InvalidParameters(err.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn from_config(config: &PasswordHashConfig) -> Result<Self, PasswordError> {
        Self::new(config.memory_kib, config.iterations, config.parallelism)
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordError::HashingFailed(err.to_string()))
    }

    /// Verify a password against a stored digest.
    pub fn verify(&self, digest: &str, plaintext: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(digest).map_err(|_| PasswordError::InvalidHashFormat)?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(HashError::Password) => Err(PasswordError::Mismatch),
            Err(err) => Err(PasswordError::HashingFailed(err.to_string())),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
