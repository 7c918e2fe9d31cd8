use async_trait::async_trait;
use estate_database::{Flat, House, HouseRepository, NewHouse, RepositoryResult};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseRepo: Send + Sync {
    async fn create(&self, house: &NewHouse) -> RepositoryResult<House>;

    async fn get_by_id(&self, house_id: i64) -> RepositoryResult<House>;

    async fn get_flats_by_house_id(&self, house_id: i64) -> RepositoryResult<Vec<Flat>>;

    /// Record a subscription. Repeated calls store repeated rows.
    async fn subscribe_by_id(&self, house_id: i64, user_id: Uuid) -> RepositoryResult<()>;
}

#[async_trait]
impl HouseRepo for HouseRepository {
    async fn create(&self, house: &NewHouse) -> RepositoryResult<House> {
        HouseRepository::create(self, house).await
    }

    async fn get_by_id(&self, house_id: i64) -> RepositoryResult<House> {
        HouseRepository::get_by_id(self, house_id).await
    }

    async fn get_flats_by_house_id(&self, house_id: i64) -> RepositoryResult<Vec<Flat>> {
        HouseRepository::get_flats_by_house_id(self, house_id).await
    }

    async fn subscribe_by_id(&self, house_id: i64, user_id: Uuid) -> RepositoryResult<()> {
        HouseRepository::subscribe_by_id(self, house_id, user_id).await
    }
}
