//! Issuing and verifying HS256 identity tokens.

use chrono::Utc;
use estate_config::AuthConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::role::Role;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing key must not be empty")]
    Configuration,
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("claim `{0}` is missing or malformed")]
    ClaimExtraction(String),
}

/// Claim set carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub role: String,
    pub exp: i64,
}

impl TokenClaims {
    /// Decode the role claim into the closed role set.
    pub fn role(&self) -> Result<Role, TokenError> {
        Role::parse(&self.role).map_err(|_| TokenError::ClaimExtraction("role".to_string()))
    }

    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.user_id)
            .map_err(|_| TokenError::ClaimExtraction("userID".to_string()))
    }
}

/// Signs and verifies tokens with a single process-wide symmetric key.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenManager {
    pub fn new(signing_key: &str) -> Result<Self, TokenError> {
        if signing_key.is_empty() {
            return Err(TokenError::Configuration);
        }

        // The algorithm is pinned here; a token header cannot select another one.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            validation,
            ttl: DEFAULT_TOKEN_TTL,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        Ok(Self::new(&config.signing_key)?.with_ttl(Duration::from_secs(config.token_ttl_seconds)))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id` that expires `ttl` from now.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            user_id: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: Utc::now().timestamp().saturating_add(ttl),
        };

        self.sign(&claims)
    }

    /// Check signature, structure and expiry and return the claim set.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                debug!(error = %err, "token verification failed");
                TokenError::InvalidToken(err.to_string())
            })
    }

    /// Return a single string claim.
    ///
    /// The token is fully verified again before the claim is read, so callers
    /// never receive data from a forged or expired token.
    pub fn extract_field(&self, token: &str, field: &str) -> Result<String, TokenError> {
        let claims = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|err| TokenError::InvalidToken(err.to_string()))?
            .claims;

        match claims.get(field) {
            Some(Value::String(value)) => Ok(value.clone()),
            _ => Err(TokenError::ClaimExtraction(field.to_string())),
        }
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|err| TokenError::Signing(err.to_string()))
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
