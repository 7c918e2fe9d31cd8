use anyhow::{Context, Result};
use estate_auth::{PasswordHasher, TokenManager};
use estate_config::AppConfig;
use estate_database::{initialize_database, prepare_database, run_migrations};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .with_target(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything the gateway needs that is built once per process.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub tokens: TokenManager,
    pub hasher: PasswordHasher,
}

impl BackendServices {
    /// Build the token manager and password hasher from `config`, then open
    /// and migrate the database.
    ///
    /// An empty signing key is rejected before the database is touched.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let tokens = TokenManager::from_config(&config.auth)
            .context("invalid token signing configuration")?;
        let hasher = PasswordHasher::from_config(&config.auth.password_hash)
            .context("invalid password hashing parameters")?;

        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        info!(
            token_ttl_seconds = tokens.ttl().as_secs(),
            max_connections = config.database.max_connections,
            "backend services ready"
        );

        Ok(Self {
            db_pool,
            tokens,
            hasher,
        })
    }
}

/// Apply pending schema migrations and close the pool.
pub async fn migrate(config: &AppConfig) -> Result<()> {
    let pool = prepare_database(&config.database).await?;
    run_migrations(&pool).await?;
    pool.close().await;

    info!(url = %config.database.url, "database is up to date");
    Ok(())
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
