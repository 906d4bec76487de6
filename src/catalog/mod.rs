//! Pet catalog: the mutable collection of listings.
//!
//! Listings keep insertion order, which is the order discovery presents them
//! in.  The only mutation after insertion is the aggregate update driven by
//! the rating ledger ([`PetCatalog::apply_ratings`]), which writes `rating`
//! and `rating_count` together in one `&mut` call so no reader can see one
//! without the other.

pub mod seed;

use log::debug;

use crate::model::{Account, PetListing, Stars};

/// Aggregate a listing carried when it was inserted.
///
/// Seed listings come with community scores (e.g. 4.8 over 24 ratings);
/// listings created in session start at zero.  The baseline is only what a
/// listing shows while nobody in the ledger has rated it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingBaseline {
    pub rating: f64,
    pub count: u32,
}

impl RatingBaseline {
    fn of(listing: &PetListing) -> Self {
        Self {
            rating: listing.rating,
            count: listing.rating_count,
        }
    }
}

struct Entry {
    listing: PetListing,
    baseline: RatingBaseline,
}

#[derive(Default)]
pub struct PetCatalog {
    entries: Vec<Entry>,
}

impl PetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the bundled sample listings.
    pub fn seeded() -> Self {
        Self::with_listings(seed::listings())
    }

    /// Build from listings whose current aggregates become their baselines.
    pub fn with_listings(listings: Vec<PetListing>) -> Self {
        let mut catalog = Self::new();
        for listing in listings {
            catalog.insert(listing);
        }
        catalog
    }

    /// Append a listing.  Its present aggregate is recorded as the baseline.
    /// A listing whose id is already present is ignored.
    pub fn insert(&mut self, listing: PetListing) -> bool {
        if self.contains(&listing.id) {
            debug!("catalog: duplicate listing id {}, ignored", listing.id);
            return false;
        }
        let baseline = RatingBaseline::of(&listing);
        self.entries.push(Entry { listing, baseline });
        true
    }

    pub fn get(&self, id: &str) -> Option<&PetListing> {
        self.entries
            .iter()
            .find(|e| e.listing.id == id)
            .map(|e| &e.listing)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PetListing> {
        self.entries.iter().map(|e| &e.listing)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn baseline(&self, id: &str) -> Option<RatingBaseline> {
        self.entries
            .iter()
            .find(|e| e.listing.id == id)
            .map(|e| e.baseline)
    }

    /// Recompute `rating` / `rating_count` for `id` from `facts` alone: the
    /// mean of the stars over their count.  An empty fact set puts the
    /// baseline back.  Returns the new `(rating, count)`, or `None` if the
    /// listing is unknown.
    pub fn apply_ratings<I>(&mut self, id: &str, facts: I) -> Option<(f64, u32)>
    where
        I: IntoIterator<Item = Stars>,
    {
        let entry = self.entries.iter_mut().find(|e| e.listing.id == id)?;

        let (sum, count) = facts
            .into_iter()
            .fold((0.0, 0u32), |(s, c), stars| (s + f64::from(stars.get()), c + 1));
        let (rating, count) = if count == 0 {
            (entry.baseline.rating, entry.baseline.count)
        } else {
            (sum / f64::from(count), count)
        };

        entry.listing.rating = rating;
        entry.listing.rating_count = count;
        Some((rating, count))
    }

    /// Listings owned by `account`, in catalog order.
    pub fn owned_by<'a>(&'a self, account: &'a Account) -> impl Iterator<Item = &'a PetListing> {
        self.iter().filter(move |p| account.owns(&p.id))
    }

    /// First `limit` featured listings.
    pub fn featured(&self, limit: usize) -> Vec<&PetListing> {
        self.iter().filter(|p| p.featured).take(limit).collect()
    }

    /// Non-featured listings, best rated first, at most `limit`.
    pub fn top_rated(&self, limit: usize) -> Vec<&PetListing> {
        let mut rest: Vec<&PetListing> = self.iter().filter(|p| !p.featured).collect();
        rest.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        rest.truncate(limit);
        rest
    }
}
