//! Domain entities for the database layer

pub mod flat;
pub mod house;
pub mod user;

pub use flat::{Flat, FlatStatus, FlatUpdate, NewFlat, UnknownFlatStatus};
pub use house::{House, NewHouse};
pub use user::User;
