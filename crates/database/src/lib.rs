//! Estate Database Crate
//!
//! SQLite persistence for the estate backend: connection management,
//! embedded migrations, entities and repository implementations.

use sqlx::SqlitePool;
use estate_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{FlatRepository, HouseRepository, UserRepository};

pub use entities::{
    flat::{Flat, FlatStatus, FlatUpdate, NewFlat, UnknownFlatStatus},
    house::{House, NewHouse},
    user::User,
};

pub use types::{
    errors::{DatabaseError, RepositoryError},
    DatabaseResult, RepositoryResult,
};

/// Connect to the configured database and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
