//! Input validation for houses and flats.

use crate::types::{ListingError, ListingResult};

pub fn validate_house(address: &str, year: i64) -> ListingResult<()> {
    if address.trim().is_empty() {
        return Err(ListingError::validation("address must not be empty"));
    }

    if year < 0 {
        return Err(ListingError::validation("year must not be negative"));
    }

    Ok(())
}

pub fn validate_flat(price: i64, rooms: i64) -> ListingResult<()> {
    if price < 0 {
        return Err(ListingError::validation("price must not be negative"));
    }

    if rooms < 1 {
        return Err(ListingError::validation("a flat has at least one room"));
    }

    Ok(())
}
