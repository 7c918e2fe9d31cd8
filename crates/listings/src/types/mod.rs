pub mod errors;

pub use errors::{ListingError, ListingResult};
