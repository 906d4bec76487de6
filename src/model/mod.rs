//! Domain records shared by every component.
//!
//! Plain data with `serde` derives; behaviour lives in the components that
//! own each record (`users`, `catalog`, `ledger`).

pub mod account;
pub mod pet;
pub mod rating;

pub use account::{Account, AuthProvider, Coordinates, Location, StoredUser};
pub use pet::{PetListing, PetType, Purpose, Sex};
pub use rating::{RatingFact, Stars};

/// Hard upper bound on images per listing (fixed-capacity storage).
pub const MAX_IMAGES: usize = 5;

/// Identifier of an [`Account`].
pub type AccountId = String;

/// Identifier of a [`PetListing`].
pub type PetId = String;

/// Image references of one listing, at most [`MAX_IMAGES`].
pub type Images = heapless::Vec<String, MAX_IMAGES>;
