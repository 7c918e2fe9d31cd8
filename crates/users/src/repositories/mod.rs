//! Persistence port for users.

use async_trait::async_trait;
use estate_database::{RepositoryResult, User, UserRepository};
use uuid::Uuid;

/// Storage operations the user service depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Persist a new user. A duplicate email is reported as `Conflict`.
    async fn create(&self, user: &User) -> RepositoryResult<()>;

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User>;

    async fn get_by_email(&self, email: &str) -> RepositoryResult<User>;
}

#[async_trait]
impl UserRepo for UserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        UserRepository::create(self, user).await
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        UserRepository::get_by_id(self, id).await
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        UserRepository::get_by_email(self, email).await
    }
}
