//! Pet listing record and its closed category enums.

use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

use super::{AccountId, Images, Location, PetId};

// ---------------------------------------------------------------------------
// Category enums
// ---------------------------------------------------------------------------

/// Species / listing category.  Serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Livestock,
    #[serde(rename = "Pet Services")]
    PetServices,
    #[serde(rename = "Pet Products")]
    PetProducts,
    Other,
}

impl PetType {
    pub const ALL: [Self; 7] = [
        Self::Dog,
        Self::Cat,
        Self::Bird,
        Self::Livestock,
        Self::PetServices,
        Self::PetProducts,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Bird => "Bird",
            Self::Livestock => "Livestock",
            Self::PetServices => "Pet Services",
            Self::PetProducts => "Pet Products",
            Self::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the listing exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Adoption")]
    ForAdoption,
    #[serde(rename = "For Breeding")]
    ForBreeding,
}

impl Purpose {
    pub const ALL: [Self; 3] = [Self::ForSale, Self::ForAdoption, Self::ForBreeding];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ForSale => "For Sale",
            Self::ForAdoption => "For Adoption",
            Self::ForBreeding => "For Breeding",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Whether a price belongs on listings with this purpose.
    pub const fn is_transaction(self) -> bool {
        matches!(self, Self::ForSale | Self::ForBreeding)
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// One advertisable pet profile.
///
/// `rating` and `rating_count` are written only by the catalog's aggregate
/// update, which sets both in the same call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListing {
    pub id: PetId,
    pub name: String,
    pub age: u8,
    pub pet_type: PetType,
    pub breed: String,
    pub purpose: Purpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    pub sex: Sex,
    pub location: Location,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub images: Images,
    pub rating: f64,
    pub rating_count: u32,
    pub featured: bool,
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
}
