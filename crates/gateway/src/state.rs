//! Shared application state for the gateway

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use estate_auth::{PasswordHasher, TokenManager};
use estate_config::AppConfig;
use estate_database::{FlatRepository, HouseRepository, UserRepository};
use estate_listings::{FlatService, HouseService};
use estate_users::UserService;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::{GatewayError, GatewayResult};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Token verification for the access guard
    pub tokens: Arc<TokenManager>,
    /// User service
    pub user_service: Arc<UserService<UserRepository>>,
    /// House service
    pub house_service: Arc<HouseService<HouseRepository>>,
    /// Flat service
    pub flat_service: Arc<FlatService<FlatRepository>>,
    /// Lifetime of the `token` cookie in seconds
    pub cookie_max_age: i64,
    /// Upper bound for a single operation
    pub request_timeout: Duration,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(
        pool: SqlitePool,
        tokens: TokenManager,
        hasher: PasswordHasher,
        config: &AppConfig,
    ) -> Self {
        let user_service = Arc::new(UserService::new(pool.clone(), hasher, tokens.clone()));
        let house_service = Arc::new(HouseService::new(pool.clone()));
        let flat_service = Arc::new(FlatService::new(pool.clone()));

        Self {
            pool,
            tokens: Arc::new(tokens),
            user_service,
            house_service,
            flat_service,
            cookie_max_age: config.auth.cookie_max_age_seconds,
            request_timeout: config.http.request_timeout(),
        }
    }

    /// Run `operation` under the request timeout.
    ///
    /// On expiry the future is dropped, which rolls back any open transaction.
    pub async fn bounded<F, T>(&self, operation: F) -> GatewayResult<T>
    where
        F: Future<Output = GatewayResult<T>>,
    {
        match tokio::time::timeout(self.request_timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.request_timeout.as_millis() as u64, "operation timed out");
                Err(GatewayError::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_config::DatabaseConfig;

    async fn state(timeout: Duration) -> GatewayState {
        let pool = estate_database::initialize_database(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();

        let mut config = AppConfig::default();
        config.http.request_timeout_ms = timeout.as_millis() as u64;

        GatewayState::new(
            pool,
            TokenManager::new("state-test-key").unwrap(),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            &config,
        )
    }

    #[tokio::test]
    async fn test_bounded_passes_results_through() {
        let state = state(Duration::from_secs(1)).await;

        assert_eq!(state.bounded(async { Ok(7) }).await.unwrap(), 7);
        assert!(matches!(
            state.bounded(async { Err::<(), _>(GatewayError::Forbidden) }).await,
            Err(GatewayError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let state = state(Duration::from_millis(10)).await;

        let result = state
            .bounded(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(GatewayError::Timeout)));
    }

    #[tokio::test]
    async fn test_state_carries_configured_cookie_lifetime() {
        let state = state(Duration::from_secs(1)).await;

        assert_eq!(state.cookie_max_age, 3600);
        assert_eq!(state.request_timeout, Duration::from_secs(1));
    }
}
