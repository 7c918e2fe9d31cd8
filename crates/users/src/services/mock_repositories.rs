//! In-memory repository used by service tests and local tooling.

use async_trait::async_trait;
use estate_database::{RepositoryError, RepositoryResult, User};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repositories::UserRepo;

/// User store backed by a map, with the same uniqueness rule as the database.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) || users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict("user".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound("user".to_string()))
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound("user".to_string()))
    }
}
