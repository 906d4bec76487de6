//! Account identity as stored in the session and user records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, PetId};

/// Latitude / longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const LOS_ANGELES: Self = Self {
        lat: 34.0522,
        lng: -118.2437,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub state: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(country: &str, state: &str, city: &str) -> Self {
        Self {
            country: country.to_owned(),
            state: state.to_owned(),
            city: city.to_owned(),
            coordinates: None,
        }
    }

    /// Location given to accounts that leave the address blank.
    pub fn default_home() -> Self {
        Self {
            coordinates: Some(Coordinates::LOS_ANGELES),
            ..Self::new("USA", "California", "Los Angeles")
        }
    }
}

/// How the account signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Email,
    Google,
    Facebook,
}

/// A registered (or socially authenticated) user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub provider: AuthProvider,
    pub location: Location,
    pub discovery_radius_km: u16,
    #[serde(default)]
    pub pet_ids: Vec<PetId>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn owns(&self, pet_id: &str) -> bool {
        self.pet_ids.iter().any(|p| p == pet_id)
    }
}

/// User-store row: the account plus its plaintext credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub account: Account,
    pub password: String,
}
