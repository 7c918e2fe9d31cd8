//! House repository for database operations.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};
use uuid::Uuid;

use super::{map_flat, parse_uuid, returned_row, storage, FLAT_COLUMNS};
use crate::entities::{Flat, House, NewHouse};
use crate::types::{RepositoryError, RepositoryResult};

const HOUSE_COLUMNS: &str = "house_id, address, year, developer, created_at, updated_at";

#[derive(Clone)]
pub struct HouseRepository {
    pool: SqlitePool,
}

impl HouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, house: &NewHouse) -> RepositoryResult<House> {
        info!(address = %house.address, "create house");

        let rows = sqlx::query(&format!(
            "INSERT INTO houses (address, year, developer, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(&house.address)
        .bind(house.year)
        .bind(&house.developer)
        .bind(house.created_at)
        .bind(house.updated_at)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "house create failed");
            RepositoryError::from_sqlx("house", "house", e)
        })?;

        let row = returned_row(rows)
            .ok_or_else(|| RepositoryError::Storage("house insert returned no row".to_string()))?;
        map_house(&row)
    }

    pub async fn get_by_id(&self, house_id: i64) -> RepositoryResult<House> {
        let row = sqlx::query(&format!("SELECT {HOUSE_COLUMNS} FROM houses WHERE house_id = ?"))
            .bind(house_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("house", "house", e))?;

        match row {
            Some(row) => map_house(&row),
            None => Err(RepositoryError::NotFound("house".to_string())),
        }
    }

    /// All flats of a house in insertion order. An unknown house yields an empty list.
    pub async fn get_flats_by_house_id(&self, house_id: i64) -> RepositoryResult<Vec<Flat>> {
        info!(house_id, "get flats by house id");

        let rows = sqlx::query(&format!(
            "SELECT {FLAT_COLUMNS} FROM flats WHERE house_id = ? ORDER BY flat_id"
        ))
        .bind(house_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("flat", "house", e))?;

        rows.iter().map(map_flat).collect()
    }

    pub async fn subscribe_by_id(&self, house_id: i64, user_id: Uuid) -> RepositoryResult<()> {
        info!(house_id, %user_id, "subscribe to house");

        sqlx::query("INSERT INTO subscribers (user_id, house_id, created_at) VALUES (?, ?, ?)")
            .bind(user_id.to_string())
            .bind(house_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(house_id, error = %e, "subscribe failed");
                RepositoryError::from_sqlx("subscription", "house", e)
            })?;

        Ok(())
    }

    /// Subscribers of a house, oldest first.
    pub async fn subscribers(&self, house_id: i64) -> RepositoryResult<Vec<Uuid>> {
        let rows = sqlx::query("SELECT user_id FROM subscribers WHERE house_id = ? ORDER BY rowid")
            .bind(house_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("subscription", "house", e))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("user_id").map_err(storage)?;
                parse_uuid(&id)
            })
            .collect()
    }
}

fn map_house(row: &SqliteRow) -> RepositoryResult<House> {
    Ok(House {
        id: row.try_get("house_id").map_err(storage)?,
        address: row.try_get("address").map_err(storage)?,
        year: row.try_get("year").map_err(storage)?,
        developer: row.try_get("developer").map_err(storage)?,
        created_at: row.try_get("created_at").map_err(storage)?,
        updated_at: row.try_get("updated_at").map_err(storage)?,
    })
}
