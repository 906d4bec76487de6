//! Star ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, PetId};

/// A star score in `1..=5`.  Other values cannot be constructed, and a
/// persisted fact carrying one fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Stars {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("stars must be 1–5, got {value}"))
    }
}

impl From<Stars> for u8 {
    fn from(s: Stars) -> Self {
        s.0
    }
}

/// One account's rating of one pet.  Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingFact {
    #[serde(alias = "userId")]
    pub account_id: AccountId,
    pub pet_id: PetId,
    pub stars: Stars,
    pub timestamp: DateTime<Utc>,
}
