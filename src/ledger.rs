//! Rating ledger: append-only record of who rated what.
//!
//! Holds at most one [`RatingFact`] per `(account, pet)` pair.  A second
//! rating for the same pair is dropped without touching the ledger or the
//! catalog.  Every successful append immediately recomputes that pet's
//! aggregate in the [`PetCatalog`].

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::catalog::PetCatalog;
use crate::model::{PetId, RatingFact, Stars};

#[derive(Debug, Default, Clone)]
pub struct RatingLedger {
    facts: Vec<RatingFact>,
}

impl RatingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted facts.  Later duplicates of an already seen
    /// `(account, pet)` pair are discarded.
    pub fn from_facts(facts: Vec<RatingFact>) -> Self {
        let mut ledger = Self::new();
        for fact in facts {
            if ledger.has_rated(&fact.account_id, &fact.pet_id) {
                warn!(
                    "ledger: duplicate persisted rating {} -> {}, dropped",
                    fact.account_id, fact.pet_id
                );
                continue;
            }
            ledger.facts.push(fact);
        }
        ledger
    }

    pub fn has_rated(&self, account_id: &str, pet_id: &str) -> bool {
        self.facts
            .iter()
            .any(|f| f.account_id == account_id && f.pet_id == pet_id)
    }

    /// Record `stars` from `account_id` for `pet_id` and refresh the pet's
    /// aggregate.
    ///
    /// Returns `None` (and changes nothing) when the pair was already rated
    /// or the pet is not in the catalog.
    pub fn rate(
        &mut self,
        catalog: &mut PetCatalog,
        account_id: &str,
        pet_id: &str,
        stars: Stars,
        at: DateTime<Utc>,
    ) -> Option<RatingFact> {
        if self.has_rated(account_id, pet_id) {
            debug!("ledger: {account_id} already rated {pet_id}, ignored");
            return None;
        }
        if !catalog.contains(pet_id) {
            warn!("ledger: rating for unknown pet {pet_id} ignored");
            return None;
        }

        let fact = RatingFact {
            account_id: account_id.to_owned(),
            pet_id: pet_id.to_owned(),
            stars,
            timestamp: at,
        };
        self.facts.push(fact.clone());
        self.recompute(catalog, pet_id);
        Some(fact)
    }

    /// Facts recorded for `pet_id`, oldest first.
    pub fn facts_for<'a>(&'a self, pet_id: &'a str) -> impl Iterator<Item = &'a RatingFact> + 'a {
        self.facts.iter().filter(move |f| f.pet_id == pet_id)
    }

    pub fn stars_for<'a>(&'a self, pet_id: &'a str) -> impl Iterator<Item = Stars> + 'a {
        self.facts_for(pet_id).map(|f| f.stars)
    }

    /// Ids of every pet `account_id` has rated.
    pub fn rated_by<'a>(&'a self, account_id: &'a str) -> impl Iterator<Item = &'a PetId> + 'a {
        self.facts
            .iter()
            .filter(move |f| f.account_id == account_id)
            .map(|f| &f.pet_id)
    }

    /// The star value `account_id` gave `pet_id`, if any.
    pub fn rating_of(&self, account_id: &str, pet_id: &str) -> Option<Stars> {
        self.facts
            .iter()
            .find(|f| f.account_id == account_id && f.pet_id == pet_id)
            .map(|f| f.stars)
    }

    /// Drop every fact by `account_id` and restore affected aggregates.
    /// Returns how many facts were removed.
    pub fn purge_account(&mut self, catalog: &mut PetCatalog, account_id: &str) -> usize {
        let mut touched: Vec<PetId> = Vec::new();
        self.facts.retain(|f| {
            if f.account_id == account_id {
                touched.push(f.pet_id.clone());
                false
            } else {
                true
            }
        });
        for pet_id in &touched {
            self.recompute(catalog, pet_id);
        }
        if !touched.is_empty() {
            info!("ledger: purged {} ratings for {account_id}", touched.len());
        }
        touched.len()
    }

    /// Recompute the aggregate of every pet that has at least one fact.
    pub fn recompute_all(&self, catalog: &mut PetCatalog) {
        let mut seen: Vec<&str> = Vec::new();
        for fact in &self.facts {
            if !seen.contains(&fact.pet_id.as_str()) {
                seen.push(&fact.pet_id);
                self.recompute(catalog, &fact.pet_id);
            }
        }
    }

    pub fn facts(&self) -> &[RatingFact] {
        &self.facts
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    fn recompute(&self, catalog: &mut PetCatalog, pet_id: &str) {
        if catalog.apply_ratings(pet_id, self.stars_for(pet_id)).is_none() {
            debug!("ledger: facts reference {pet_id}, which is not in the catalog");
        }
    }
}
