//! Database repository implementations

pub mod flat_repository;
pub mod house_repository;
pub mod user_repository;

pub use flat_repository::*;
pub use house_repository::*;
pub use user_repository::*;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::entities::{Flat, FlatStatus};
use crate::types::{RepositoryError, RepositoryResult};

pub(crate) fn parse_uuid(value: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepositoryError::Storage(format!("stored identifier `{value}` is not a uuid")))
}

pub(crate) fn storage(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(err.to_string())
}

/// Single row of a data-modifying statement with `RETURNING`.
///
/// Such statements must be driven with `fetch_all`: stopping at the first row
/// leaves the statement unfinished and its write invisible to other
/// connections.
pub(crate) fn returned_row(rows: Vec<SqliteRow>) -> Option<SqliteRow> {
    rows.into_iter().next()
}

/// Map a `flats` row. An unrecognised status is a data-integrity failure.
pub(crate) fn map_flat(row: &SqliteRow) -> RepositoryResult<Flat> {
    let status: String = row.try_get("status").map_err(storage)?;
    let status = FlatStatus::parse(&status).map_err(|e| RepositoryError::Storage(e.to_string()))?;

    let moderator_id: Option<String> = row.try_get("moderator_id").map_err(storage)?;
    let moderator_id = moderator_id.as_deref().map(parse_uuid).transpose()?;

    Ok(Flat {
        id: row.try_get("flat_id").map_err(storage)?,
        house_id: row.try_get("house_id").map_err(storage)?,
        price: row.try_get("price").map_err(storage)?,
        rooms: row.try_get("rooms").map_err(storage)?,
        status,
        moderator_id,
    })
}

pub(crate) const FLAT_COLUMNS: &str = "flat_id, house_id, price, rooms, status, moderator_id";
