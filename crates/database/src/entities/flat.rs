//! Flat entity definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Moderation state of a flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatStatus {
    Created,
    OnModeration,
    Approved,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown flat status `{0}`")]
pub struct UnknownFlatStatus(pub String);

impl FlatStatus {
    pub const ALL: [FlatStatus; 4] = [
        FlatStatus::Created,
        FlatStatus::OnModeration,
        FlatStatus::Approved,
        FlatStatus::Declined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlatStatus::Created => "created",
            FlatStatus::OnModeration => "on_moderation",
            FlatStatus::Approved => "approved",
            FlatStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownFlatStatus> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownFlatStatus(value.to_string()))
    }
}

impl FromStr for FlatStatus {
    type Err = UnknownFlatStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlatStatus::parse(s)
    }
}

impl fmt::Display for FlatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flat {
    pub id: i64,
    pub house_id: i64,
    pub price: i64,
    pub rooms: i64,
    pub status: FlatStatus,
    pub moderator_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlat {
    pub house_id: i64,
    pub price: i64,
    pub rooms: i64,
}

/// Compare-and-set status change: applied only while the stored status
/// still equals `expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatUpdate {
    pub flat_id: i64,
    pub house_id: i64,
    pub expected: FlatStatus,
    pub status: FlatStatus,
    pub moderator_id: Uuid,
}
