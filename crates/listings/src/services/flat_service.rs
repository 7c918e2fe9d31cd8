//! Flat creation and moderation.

use estate_database::{Flat, FlatRepository, FlatStatus, FlatUpdate, NewFlat, RepositoryError};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::repositories::FlatRepo;
use crate::types::{ListingError, ListingResult};
use crate::utils::{check_transition, validate_flat};

pub struct FlatService<F> {
    flats: F,
}

impl FlatService<FlatRepository> {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_repository(FlatRepository::new(pool))
    }
}

impl<F> FlatService<F>
where
    F: FlatRepo,
{
    pub fn with_repository(flats: F) -> Self {
        Self { flats }
    }

    /// Create a flat in status `created`.
    pub async fn create(&self, house_id: i64, price: i64, rooms: i64) -> ListingResult<Flat> {
        validate_flat(price, rooms)?;

        let flat = self
            .flats
            .create(&NewFlat {
                house_id,
                price,
                rooms,
            })
            .await
            .map_err(|err| match err {
                RepositoryError::MissingReference(_) => ListingError::HouseNotFound { id: house_id },
                other => {
                    warn!(op = "flat.create", house_id, error = %other, "flat create failed");
                    ListingError::storage(other)
                }
            })?;

        info!(op = "flat.create", flat_id = flat.id, house_id, "created flat");
        Ok(flat)
    }

    /// Move a flat along the moderation workflow on behalf of `moderator_id`.
    ///
    /// The requested status is parsed and checked against the current one
    /// before anything is written; on any error the stored flat is unchanged.
    pub async fn update(
        &self,
        moderator_id: Uuid,
        flat_id: i64,
        house_id: i64,
        new_status: &str,
    ) -> ListingResult<Flat> {
        let current = self
            .flats
            .get_by_id(flat_id, house_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => ListingError::FlatNotFound { id: flat_id },
                other => ListingError::storage(other),
            })?;

        let status = FlatStatus::parse(new_status).map_err(|_| {
            warn!(op = "flat.update", flat_id, status = new_status, "unknown flat status");
            ListingError::invalid_transition(current.status.as_str(), new_status)
        })?;

        check_transition(current.status, status).map_err(|err| {
            warn!(op = "flat.update", flat_id, from = %current.status, to = %status, "transition rejected");
            err
        })?;

        let updated = self
            .flats
            .update(&FlatUpdate {
                flat_id,
                house_id,
                expected: current.status,
                status,
                moderator_id,
            })
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => {
                    ListingError::invalid_transition(current.status.as_str(), status.as_str())
                }
                RepositoryError::NotFound(_) => ListingError::FlatNotFound { id: flat_id },
                other => ListingError::storage(other),
            })?;

        info!(
            op = "flat.update",
            flat_id,
            %moderator_id,
            status = %updated.status,
            "updated flat status"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockFlatRepo;

    fn flat(status: FlatStatus) -> Flat {
        Flat {
            id: 1,
            house_id: 2,
            price: 100_000,
            rooms: 2,
            status,
            moderator_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_in_created() {
        let mut repo = MockFlatRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|new| {
                Ok(Flat {
                    id: 11,
                    house_id: new.house_id,
                    price: new.price,
                    rooms: new.rooms,
                    status: FlatStatus::Created,
                    moderator_id: None,
                })
            });

        let created = FlatService::with_repository(repo)
            .create(2, 100_000, 2)
            .await
            .unwrap();
        assert_eq!(created.id, 11);
        assert_eq!(created.status, FlatStatus::Created);
    }

    #[tokio::test]
    async fn test_create_for_missing_house() {
        let mut repo = MockFlatRepo::new();
        repo.expect_create()
            .returning(|_| Err(RepositoryError::MissingReference("house".to_string())));

        assert!(matches!(
            FlatService::with_repository(repo).create(5, 1, 1).await,
            Err(ListingError::HouseNotFound { id: 5 })
        ));
    }

    #[tokio::test]
    async fn test_unknown_status_never_reaches_storage() {
        let mut repo = MockFlatRepo::new();
        repo.expect_get_by_id()
            .returning(|_, _| Ok(flat(FlatStatus::Created)));
        repo.expect_update().never();

        let result = FlatService::with_repository(repo)
            .update(Uuid::now_v7(), 1, 2, "sold")
            .await;
        assert!(matches!(
            result,
            Err(ListingError::InvalidStatusTransition { ref to, .. }) if to == "sold"
        ));
    }

    #[tokio::test]
    async fn test_skipping_moderation_is_rejected() {
        let mut repo = MockFlatRepo::new();
        repo.expect_get_by_id()
            .returning(|_, _| Ok(flat(FlatStatus::Created)));
        repo.expect_update().never();

        let result = FlatService::with_repository(repo)
            .update(Uuid::now_v7(), 1, 2, "approved")
            .await;
        assert!(matches!(result, Err(ListingError::InvalidStatusTransition { .. })));
    }

    #[tokio::test]
    async fn test_update_records_moderator_and_expected_status() {
        let moderator = Uuid::now_v7();
        let mut repo = MockFlatRepo::new();
        repo.expect_get_by_id()
            .returning(|_, _| Ok(flat(FlatStatus::OnModeration)));
        repo.expect_update()
            .withf(move |update| {
                update.expected == FlatStatus::OnModeration
                    && update.status == FlatStatus::Declined
                    && update.moderator_id == moderator
            })
            .times(1)
            .returning(|update| {
                Ok(Flat {
                    status: update.status,
                    moderator_id: Some(update.moderator_id),
                    ..flat(FlatStatus::OnModeration)
                })
            });

        let updated = FlatService::with_repository(repo)
            .update(moderator, 1, 2, "declined")
            .await
            .unwrap();
        assert_eq!(updated.status, FlatStatus::Declined);
        assert_eq!(updated.moderator_id, Some(moderator));
    }

    #[tokio::test]
    async fn test_lost_race_is_an_invalid_transition() {
        let mut repo = MockFlatRepo::new();
        repo.expect_get_by_id()
            .returning(|_, _| Ok(flat(FlatStatus::Created)));
        repo.expect_update()
            .returning(|_| Err(RepositoryError::Conflict("flat status".to_string())));

        let result = FlatService::with_repository(repo)
            .update(Uuid::now_v7(), 1, 2, "on_moderation")
            .await;
        assert!(matches!(result, Err(ListingError::InvalidStatusTransition { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_flat() {
        let mut repo = MockFlatRepo::new();
        repo.expect_get_by_id()
            .returning(|_, _| Err(RepositoryError::NotFound("flat".to_string())));

        let result = FlatService::with_repository(repo)
            .update(Uuid::now_v7(), 99, 2, "on_moderation")
            .await;
        assert!(matches!(result, Err(ListingError::FlatNotFound { id: 99 })));
    }
}
