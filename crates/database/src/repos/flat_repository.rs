//! Flat repository for database operations.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, warn};

use super::{map_flat, returned_row, storage, FLAT_COLUMNS};
use crate::entities::{Flat, FlatStatus, FlatUpdate, NewFlat};
use crate::types::{RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct FlatRepository {
    pool: SqlitePool,
}

impl FlatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a flat in status `created` and commit.
    ///
    /// The transaction is rolled back when it is dropped before commit, which
    /// covers both errors and a caller abandoning the future.
    pub async fn create(&self, flat: &NewFlat) -> RepositoryResult<Flat> {
        info!(house_id = flat.house_id, "create flat");

        let mut tx = self.pool.begin().await.map_err(storage)?;
        let saved = Self::insert(&mut tx, flat).await?;
        tx.commit().await.map_err(|e| {
            warn!(house_id = flat.house_id, error = %e, "flat create commit failed");
            storage(e)
        })?;

        Ok(saved)
    }

    /// Insert on an existing connection and touch the owning house.
    ///
    /// Both statements must run inside one transaction for the insert to be
    /// atomic; [`FlatRepository::create`] provides it.
    pub async fn insert(conn: &mut SqliteConnection, flat: &NewFlat) -> RepositoryResult<Flat> {
        let rows = sqlx::query(&format!(
            "INSERT INTO flats (house_id, price, rooms, status) VALUES (?, ?, ?, ?) RETURNING {FLAT_COLUMNS}"
        ))
        .bind(flat.house_id)
        .bind(flat.price)
        .bind(flat.rooms)
        .bind(FlatStatus::Created.as_str())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            warn!(house_id = flat.house_id, error = %e, "flat insert failed");
            RepositoryError::from_sqlx("flat", "house", e)
        })?;

        let row = returned_row(rows)
            .ok_or_else(|| RepositoryError::Storage("flat insert returned no row".to_string()))?;
        let saved = map_flat(&row)?;

        sqlx::query("UPDATE houses SET updated_at = ? WHERE house_id = ?")
            .bind(Utc::now())
            .bind(flat.house_id)
            .execute(&mut *conn)
            .await
            .map_err(storage)?;

        Ok(saved)
    }

    /// Apply a status change only if the stored status still matches
    /// `update.expected`.
    ///
    /// Returns [`RepositoryError::NotFound`] when the flat does not exist in
    /// the given house and [`RepositoryError::Conflict`] when its status moved
    /// on in the meantime.
    pub async fn update(&self, update: &FlatUpdate) -> RepositoryResult<Flat> {
        info!(
            flat_id = update.flat_id,
            house_id = update.house_id,
            status = %update.status,
            "update flat"
        );

        let rows = sqlx::query(&format!(
            "UPDATE flats SET status = ?, moderator_id = ? WHERE flat_id = ? AND house_id = ? AND status = ? RETURNING {FLAT_COLUMNS}"
        ))
        .bind(update.status.as_str())
        .bind(update.moderator_id.to_string())
        .bind(update.flat_id)
        .bind(update.house_id)
        .bind(update.expected.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("flat", "house", e))?;

        match returned_row(rows) {
            Some(row) => map_flat(&row),
            None => {
                // Distinguish a missing flat from a lost race.
                self.get_by_id(update.flat_id, update.house_id).await?;
                warn!(flat_id = update.flat_id, "flat status changed concurrently");
                Err(RepositoryError::Conflict("flat status".to_string()))
            }
        }
    }

    pub async fn get_by_id(&self, flat_id: i64, house_id: i64) -> RepositoryResult<Flat> {
        let row = sqlx::query(&format!(
            "SELECT {FLAT_COLUMNS} FROM flats WHERE flat_id = ? AND house_id = ?"
        ))
        .bind(flat_id)
        .bind(house_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("flat", "house", e))?;

        match row {
            Some(row) => map_flat(&row),
            None => Err(RepositoryError::NotFound("flat".to_string())),
        }
    }
}
