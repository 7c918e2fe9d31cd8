//! Business logic services for houses and flats.

pub mod flat_service;
pub mod house_service;

pub use flat_service::FlatService;
pub use house_service::HouseService;
