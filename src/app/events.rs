//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them: log them, drive a UI toast, record them in
//! a test.

use crate::discovery::DiscoveryState;
use crate::error::AuthError;
use crate::filter::FilterSelection;
use crate::model::{AccountId, AuthProvider, PetId, Stars};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Persisted state was loaded at startup.
    Restored { signed_in: bool, ratings: usize },

    /// An authentication request entered the pending slot.
    AuthPending { kind: &'static str },

    AuthCancelled,

    /// Authentication was refused (bad form, duplicate email, busy…).
    AuthFailed(AuthError),

    SignedIn { account_id: AccountId, provider: AuthProvider },

    SignedOut { account_id: AccountId, purged_ratings: usize },

    /// A rating was recorded; carries the pet's new aggregate.
    Rated {
        pet_id: PetId,
        stars: Stars,
        rating: f64,
        rating_count: u32,
    },

    /// Re-rating attempt; nothing changed.
    RatingIgnored { pet_id: PetId },

    /// The discovery state machine moved.
    DiscoveryChanged { from: DiscoveryState, to: DiscoveryState },

    /// Rated from focused mode; focus was cleared.
    ReturnedToBrowsing,

    FilterChanged(FilterSelection),

    RadiusChanged { radius_km: u16 },

    GlobalSearchEnabled,

    /// A new listing was created from the add-pet form.
    PetListed { pet_id: PetId },
}
