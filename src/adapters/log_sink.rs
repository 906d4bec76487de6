//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every application event through the
//! `log` facade.  Hosts pick the logger; a UI adapter would implement the
//! same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Restored { signed_in, ratings } => {
                info!("START | restored signed_in={signed_in} ratings={ratings}");
            }
            AppEvent::AuthPending { kind } => info!("AUTH  | {kind} pending"),
            AppEvent::AuthCancelled => info!("AUTH  | cancelled"),
            AppEvent::AuthFailed(e) => warn!("AUTH  | failed: {e}"),
            AppEvent::SignedIn {
                account_id,
                provider,
            } => info!("AUTH  | signed in {account_id} via {provider:?}"),
            AppEvent::SignedOut {
                account_id,
                purged_ratings,
            } => info!("AUTH  | signed out {account_id}, {purged_ratings} ratings purged"),
            AppEvent::Rated {
                pet_id,
                stars,
                rating,
                rating_count,
            } => info!(
                "RATE  | {pet_id} +{}\u{2605} -> {rating:.2} over {rating_count}",
                stars.get()
            ),
            AppEvent::RatingIgnored { pet_id } => info!("RATE  | {pet_id} already rated, ignored"),
            AppEvent::DiscoveryChanged { from, to } => info!("STATE | {from:?} -> {to:?}"),
            AppEvent::ReturnedToBrowsing => info!("STATE | focus cleared after rating"),
            AppEvent::FilterChanged(f) => info!(
                "FILTR | type={} purpose={}",
                f.pet_type.map_or("All", |t| t.label()),
                f.purpose.map_or("All", |p| p.label())
            ),
            AppEvent::RadiusChanged { radius_km } => info!("RADUS | {radius_km} km"),
            AppEvent::GlobalSearchEnabled => info!("RADUS | global"),
            AppEvent::PetListed { pet_id } => info!("PET   | listed {pet_id}"),
        }
    }
}
