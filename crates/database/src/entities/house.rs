//! House entity definitions

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct House {
    pub id: i64,
    pub address: String,
    pub year: i64,
    pub developer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHouse {
    pub address: String,
    pub year: i64,
    pub developer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
