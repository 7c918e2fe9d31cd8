use async_trait::async_trait;
use estate_database::{Flat, FlatRepository, FlatUpdate, NewFlat, RepositoryResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlatRepo: Send + Sync {
    /// Insert atomically in status `created`; storage assigns the id.
    async fn create(&self, flat: &NewFlat) -> RepositoryResult<Flat>;

    /// Compare-and-set on the current status. `Conflict` when it moved.
    async fn update(&self, update: &FlatUpdate) -> RepositoryResult<Flat>;

    async fn get_by_id(&self, flat_id: i64, house_id: i64) -> RepositoryResult<Flat>;
}

#[async_trait]
impl FlatRepo for FlatRepository {
    async fn create(&self, flat: &NewFlat) -> RepositoryResult<Flat> {
        FlatRepository::create(self, flat).await
    }

    async fn update(&self, update: &FlatUpdate) -> RepositoryResult<Flat> {
        FlatRepository::update(self, update).await
    }

    async fn get_by_id(&self, flat_id: i64, house_id: i64) -> RepositoryResult<Flat> {
        FlatRepository::get_by_id(self, flat_id, house_id).await
    }
}
