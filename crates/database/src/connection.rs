//! Database connection management

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tracing::info;
use estate_config::DatabaseConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Prepare and establish a database connection pool.
///
/// In-memory databases live only as long as one of their connections, so
/// the pool is pinned to a single connection that is never recycled.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    let in_memory = is_in_memory(&config.url);

    let parsed = if in_memory {
        SqliteConnectOptions::from_str("sqlite::memory:")
    } else {
        ensure_sqlite_path(&config.url).await?;
        SqliteConnectOptions::from_str(&config.url)
            .map(|options| options.journal_mode(SqliteJournalMode::Wal))
    };
    let options = parsed
        .with_context(|| format!("invalid database url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.trim_start_matches("sqlite:").trim_start_matches("//") == ":memory:"
}

/// Ensure the directory holding the SQLite database file exists
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(sqlite_path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let sqlite_path = sqlite_path.split('?').next().unwrap_or_default();
    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_database_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested/dir/test.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
        };

        let pool = prepare_database(&config).await.unwrap();
        sqlx::query("SELECT 1").execute(&pool).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_database_survives_idle_periods() {
        let config = DatabaseConfig {
            url: "sqlite://:memory:".to_string(),
            max_connections: 8,
        };

        let pool = prepare_database(&config).await.unwrap();
        sqlx::query("CREATE TABLE probe (id INTEGER)")
            .execute(&pool)
            .await
            .unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM probe")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://:memory:"));
        assert!(!is_in_memory("sqlite://estate.db"));
    }
}
