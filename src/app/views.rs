//! Read-only projections, one per screen.
//!
//! Views are plain owned snapshots built on demand by the
//! [`AppService`](super::service::AppService); holding one never borrows
//! the service.

use crate::discovery::DiscoveryState;
use crate::filter::{Category, FilterSelection};
use crate::model::{Account, PetListing, Stars};

/// The discover screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverView {
    pub state: DiscoveryState,
    /// Listing under the cursor; `None` when exhausted.
    pub current: Option<PetListing>,
    /// Cursor position and size of the working set.
    pub position: usize,
    pub total: usize,
    /// Whether the rating affordance is offered.  `false` for a pet this
    /// account already rated (focused mode can show one); only "next" is.
    pub can_rate: bool,
    /// This account's earlier rating of `current`, if any.
    pub my_rating: Option<Stars>,
    pub filter: FilterSelection,
    pub radius_km: u16,
    pub global: bool,
    /// "Increase radius" still has room to grow.
    pub can_increase_radius: bool,
}

impl DiscoverView {
    pub fn is_exhausted(&self) -> bool {
        self.state == DiscoveryState::Exhausted
    }

    pub fn is_focused(&self) -> bool {
        self.state == DiscoveryState::Focused
    }
}

/// Aggregates over the listings an account owns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub pet_count: usize,
    /// Sum of `rating_count` over owned pets.
    pub total_ratings: u32,
    /// Mean of the owned pets' ratings; 0.0 with no pets.
    pub average_rating: f64,
}

impl ProfileStats {
    pub fn of<'a>(pets: impl IntoIterator<Item = &'a PetListing>) -> Self {
        let (mut count, mut total, mut sum) = (0usize, 0u32, 0.0f64);
        for pet in pets {
            count += 1;
            total = total.saturating_add(pet.rating_count);
            sum += pet.rating;
        }
        Self {
            pet_count: count,
            total_ratings: total,
            average_rating: if count == 0 { 0.0 } else { sum / count as f64 },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub account: Account,
    pub pets: Vec<PetListing>,
    pub stats: ProfileStats,
    pub min_radius_km: u16,
    pub max_radius_km: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopPicksView {
    /// Featured listings, catalog order.
    pub featured: Vec<PetListing>,
    /// Best-rated non-featured listings, highest first.
    pub top_rated: Vec<PetListing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTile {
    pub category: Category,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreView {
    pub pet_types: Vec<CategoryTile>,
    pub purposes: Vec<CategoryTile>,
    pub filter: FilterSelection,
}

impl ExploreView {
    pub fn new(filter: FilterSelection) -> Self {
        let tile = |category: Category| CategoryTile {
            category,
            label: category.label(),
            active: filter.is_active(category),
        };
        let (pet_types, purposes) = Category::all()
            .map(tile)
            .partition(|t| matches!(t.category, Category::PetType(_)));
        Self {
            pet_types,
            purposes,
            filter,
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filter.is_empty()
    }
}
