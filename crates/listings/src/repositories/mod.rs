//! Persistence ports for houses and flats.

pub mod flat_repository;
pub mod house_repository;

pub use flat_repository::FlatRepo;
pub use house_repository::HouseRepo;

#[cfg(test)]
pub use flat_repository::MockFlatRepo;
#[cfg(test)]
pub use house_repository::MockHouseRepo;
