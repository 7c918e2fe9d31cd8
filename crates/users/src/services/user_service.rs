//! User service for registration and login.

use estate_auth::{PasswordError, PasswordHasher, Role, TokenManager};
use estate_database::{RepositoryError, User, UserRepository};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use super::mock_repositories::InMemoryUserRepository;
use crate::repositories::UserRepo;
use crate::types::{UserError, UserResult};
use crate::utils::{validate_email, validate_password};

/// Service owning the account rules: unique emails, hashed credentials and
/// tokens bound to the stored role.
pub struct UserService<R> {
    user_repository: R,
    hasher: PasswordHasher,
    tokens: TokenManager,
}

impl UserService<UserRepository> {
    /// Create a user service backed by the database
    pub fn new(pool: SqlitePool, hasher: PasswordHasher, tokens: TokenManager) -> Self {
        Self::with_repository(UserRepository::new(pool), hasher, tokens)
    }
}

impl UserService<InMemoryUserRepository> {
    /// Create a user service backed by an in-memory store
    pub fn new_for_testing(hasher: PasswordHasher, tokens: TokenManager) -> Self {
        Self::with_repository(InMemoryUserRepository::new(), hasher, tokens)
    }
}

impl<R> UserService<R>
where
    R: UserRepo,
{
    pub fn with_repository(user_repository: R, hasher: PasswordHasher, tokens: TokenManager) -> Self {
        Self {
            user_repository,
            hasher,
            tokens,
        }
    }

    pub fn repository(&self) -> &R {
        &self.user_repository
    }

    /// Register a new account and return its identifier.
    pub async fn register(&self, email: &str, password: &str, role: &str) -> UserResult<Uuid> {
        let role = parse_role(role)?;
        validate_email(email)?;
        validate_password(password)?;

        let password_hash = self.hash(password).await?;
        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            password_hash,
            role,
        };

        self.user_repository
            .create(&user)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => UserError::UserAlreadyExists,
                other => {
                    warn!(error = %other, "user registration failed");
                    UserError::Storage(other.to_string())
                }
            })?;

        info!(user_id = %user.id, role = %role, "registered user");
        Ok(user.id)
    }

    /// Verify credentials and issue a token carrying the stored role.
    pub async fn login(&self, user_id: Uuid, password: &str) -> UserResult<String> {
        let user = self
            .user_repository
            .get_by_id(user_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => UserError::UserNotFound,
                other => UserError::Storage(other.to_string()),
            })?;

        self.verify(&user.password_hash, password).await.map_err(|err| {
            warn!(%user_id, "login rejected");
            err
        })?;

        let token = self.tokens.issue(user.id, user.role)?;
        info!(%user_id, role = %user.role, "user logged in");
        Ok(token)
    }

    /// Issue a token for a fresh, unpersisted identity.
    pub async fn dummy_login(&self, role: &str) -> UserResult<String> {
        let role = parse_role(role)?;
        let user_id = Uuid::now_v7();

        let token = self.tokens.issue(user_id, role)?;
        info!(%user_id, role = %role, "dummy login");
        Ok(token)
    }

    // Argon2 is CPU bound; keep it off the async workers.
    async fn hash(&self, password: &str) -> UserResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Hashing(e.to_string()))?
            .map_err(|e| UserError::Hashing(e.to_string()))
    }

    async fn verify(&self, digest: &str, password: &str) -> UserResult<()> {
        let hasher = self.hasher.clone();
        let digest = digest.to_owned();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| UserError::Hashing(e.to_string()))?
            .map_err(|err| match err {
                PasswordError::Mismatch => UserError::InvalidCredentials,
                other => UserError::Hashing(other.to_string()),
            })
    }
}

fn parse_role(role: &str) -> UserResult<Role> {
    Role::parse(role).map_err(|_| UserError::InvalidRole(role.to_string()))
}
