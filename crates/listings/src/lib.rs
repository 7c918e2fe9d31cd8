//! # Estate Listings Crate
//!
//! Business logic for houses and flats: house creation, flat listing,
//! subscriptions and the flat moderation workflow.
//!
//! ## Architecture
//!
//! - **Repositories**: ports over house and flat storage
//! - **Services**: [`HouseService`] and [`FlatService`]
//! - **Types**: [`ListingError`] and result aliases
//! - **Utils**: input validation and the moderation state machine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_listings::{FlatService, HouseService};
//!
//! let houses = HouseService::new(pool.clone());
//! let house = houses.create("Main St", 2020, "").await?;
//! let flat = FlatService::new(pool).create(house.id, 100_000, 2).await?;
//! ```

pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use estate_database::{Flat, FlatStatus, House};
pub use repositories::{FlatRepo, HouseRepo};
pub use services::{FlatService, HouseService};
pub use types::{ListingError, ListingResult};
