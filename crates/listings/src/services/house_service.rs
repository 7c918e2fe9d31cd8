//! House creation, flat listing and subscriptions.

use chrono::Utc;
use estate_database::{Flat, House, HouseRepository, NewHouse, RepositoryError};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::repositories::HouseRepo;
use crate::types::{ListingError, ListingResult};
use crate::utils::validate_house;

pub struct HouseService<H> {
    houses: H,
}

impl HouseService<HouseRepository> {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_repository(HouseRepository::new(pool))
    }
}

impl<H> HouseService<H>
where
    H: HouseRepo,
{
    pub fn with_repository(houses: H) -> Self {
        Self { houses }
    }

    /// Create a house stamped with the current time.
    pub async fn create(&self, address: &str, year: i64, developer: &str) -> ListingResult<House> {
        validate_house(address, year)?;

        let now = Utc::now();
        let house = self
            .houses
            .create(&NewHouse {
                address: address.to_string(),
                year,
                developer: developer.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                warn!(op = "house.create", error = %err, "house create failed");
                ListingError::storage(err)
            })?;

        info!(op = "house.create", house_id = house.id, "created house");
        Ok(house)
    }

    pub async fn get(&self, house_id: i64) -> ListingResult<House> {
        self.houses
            .get_by_id(house_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => ListingError::HouseNotFound { id: house_id },
                other => ListingError::storage(other),
            })
    }

    /// Flats of a house. A house without flats, or an unknown id, yields an empty list.
    pub async fn list_flats(&self, house_id: i64) -> ListingResult<Vec<Flat>> {
        let flats = self
            .houses
            .get_flats_by_house_id(house_id)
            .await
            .map_err(|err| {
                warn!(op = "house.list_flats", house_id, error = %err, "listing flats failed");
                ListingError::storage(err)
            })?;

        info!(op = "house.list_flats", house_id, count = flats.len(), "listed flats");
        Ok(flats)
    }

    pub async fn subscribe(&self, house_id: i64, user_id: Uuid) -> ListingResult<()> {
        self.houses
            .subscribe_by_id(house_id, user_id)
            .await
            .map_err(|err| match err {
                RepositoryError::MissingReference(_) => ListingError::HouseNotFound { id: house_id },
                other => {
                    warn!(op = "house.subscribe", house_id, error = %other, "subscribe failed");
                    ListingError::storage(other)
                }
            })?;

        info!(op = "house.subscribe", house_id, %user_id, "subscribed to house");
        Ok(())
    }
}
