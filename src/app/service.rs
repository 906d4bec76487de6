//! Application service: the hexagonal core.
//!
//! [`AppService`] owns every piece of domain state: user store, session,
//! catalog, ledger, filter and discovery engine.  Each intent runs to
//! completion before the next one; all I/O flows through port traits
//! injected at call sites, so the whole service is testable with mock
//! adapters.
//!
//! ```text
//!  Intent ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!             │          AppService          │
//! ClockPort ─▶│ Session · Ledger · Discovery │◀─▶ StoragePort
//!             └──────────────────────────────┘
//! ```

use chrono::Duration;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::PetCatalog;
use crate::config::AppConfig;
use crate::discovery::{DiscoveryEngine, DiscoveryInputs, DiscoveryState, RateOutcome};
use crate::error::{AuthError, Error, PersistError, Result};
use crate::filter::{FilterSelection, FilterState};
use crate::ledger::RatingLedger;
use crate::model::{Account, AuthProvider, PetId, PetListing, Stars};
use crate::persistence;
use crate::session::{AuthRequest, SessionState, social_account};
use crate::users::{Registration, UserStore};
use crate::validation::{self, PetDraft};

use super::commands::Intent;
use super::events::AppEvent;
use super::ports::{ClockPort, ConfigError, ConfigPort, EventSink, StoragePort};
use super::views::{DiscoverView, ExploreView, ProfileStats, ProfileView, TopPicksView};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: AppConfig,
    users: UserStore,
    session: SessionState,
    catalog: PetCatalog,
    ledger: RatingLedger,
    filter: FilterState,
    discovery: DiscoveryEngine,
}

/// Discovery inputs from individual fields, so the engine can be borrowed
/// mutably alongside them.
fn inputs<'a>(
    catalog: &'a PetCatalog,
    ledger: &'a RatingLedger,
    filter: &FilterState,
    session: &'a SessionState,
) -> DiscoveryInputs<'a> {
    DiscoveryInputs {
        catalog,
        ledger,
        filter: filter.active(),
        account_id: session.current().map(|a| a.id.as_str()),
    }
}

/// Persistence is best effort: a failed write is logged, the in-memory
/// transition stands.
fn persisted(what: &str, result: core::result::Result<(), PersistError>) {
    if let Err(e) = result {
        warn!("AppService: saving {what} failed: {e}");
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

impl AppService {
    /// Service over the bundled sample catalog.
    pub fn new(config: AppConfig) -> Self {
        Self::with_catalog(config, PetCatalog::seeded())
    }

    pub fn with_catalog(config: AppConfig, catalog: PetCatalog) -> Self {
        let mut svc = Self {
            discovery: DiscoveryEngine::new(config.default_radius_km),
            config,
            users: UserStore::new(),
            session: SessionState::new(),
            catalog,
            ledger: RatingLedger::new(),
            filter: FilterState::new(),
        };
        svc.refresh_discovery();
        svc
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load config, users, ratings and session from storage.
    ///
    /// Never fails: anything absent or unreadable falls back to its default
    /// (logged).  Aggregates are recomputed from the restored facts.
    pub fn restore(&mut self, store: &(impl StoragePort + ConfigPort), sink: &mut impl EventSink) {
        match store.load() {
            Ok(config) => self.config = config,
            Err(e) => warn!("AppService: stored config unusable ({e}), using defaults"),
        }

        self.users = UserStore::from_users(persistence::load_users(store));
        self.ledger = RatingLedger::from_facts(persistence::load_ratings(store));
        self.ledger.recompute_all(&mut self.catalog);

        self.session.logout();
        if let Some(account) = persistence::load_session(store) {
            self.session.login(account);
        }

        let radius = self.session_radius();
        let before = self.discovery.state();
        self.discovery.reset(
            radius,
            &inputs(&self.catalog, &self.ledger, &self.filter, &self.session),
        );

        info!(
            "AppService restored: {} users, {} ratings, signed_in={}",
            self.users.len(),
            self.ledger.len(),
            self.session.is_authenticated()
        );
        sink.emit(&AppEvent::Restored {
            signed_in: self.session.is_authenticated(),
            ratings: self.ledger.len(),
        });
        self.emit_discovery_change(before, sink);
    }

    /// Validate and persist a new configuration, then apply it.
    pub fn update_config(
        &mut self,
        config: AppConfig,
        port: &mut impl ConfigPort,
    ) -> core::result::Result<(), ConfigError> {
        port.save(&config)?;
        self.config = config;
        info!("AppService: configuration updated");
        Ok(())
    }

    // ── Intent handling ───────────────────────────────────────

    /// Apply one user intent.
    ///
    /// Everything except the authentication intents requires a signed-in
    /// account ([`AuthError::NotAuthenticated`]).
    pub fn handle_intent(
        &mut self,
        intent: Intent,
        store: &mut impl StoragePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        debug!("AppService: intent {}", intent.name());
        if !intent.is_public() && !self.session.is_authenticated() {
            warn!("AppService: {} refused, not signed in", intent.name());
            return Err(AuthError::NotAuthenticated.into());
        }

        let before = self.discovery.state();
        let result = match intent {
            Intent::Register(reg) => self.register(reg, clock, sink),
            Intent::Login { email, password } => self.login(email, password, clock, sink),
            Intent::SocialAuth(provider) => self.social_auth(provider, clock, sink),
            Intent::CancelPendingAuth => {
                self.cancel_pending_auth(sink);
                Ok(())
            }
            Intent::Logout => {
                self.logout(store, sink);
                Ok(())
            }
            Intent::SetFilter(selection) => {
                self.set_filter(selection, sink);
                Ok(())
            }
            Intent::ToggleCategory(category) => {
                let next = self.filter.active().toggled(category);
                self.set_filter(next, sink);
                Ok(())
            }
            Intent::ClearFilters => {
                self.set_filter(FilterSelection::NONE, sink);
                Ok(())
            }
            Intent::Rate { pet_id, stars } => self.rate(&pet_id, stars, store, clock, sink).map(drop),
            Intent::SetRadius(km) => {
                self.set_radius(km, store, sink);
                Ok(())
            }
            Intent::IncreaseRadius => {
                self.increase_radius(store, sink);
                Ok(())
            }
            Intent::GoGlobal => {
                self.go_global(sink);
                Ok(())
            }
            Intent::FocusPet(pet_id) => self.focus_pet(&pet_id),
            Intent::ClearFocus => {
                self.clear_focus();
                Ok(())
            }
            Intent::AdvanceCursor => {
                self.discovery.advance_cursor();
                Ok(())
            }
            Intent::AddPet(draft) => self.add_pet(draft, store, clock, sink).map(drop),
        };
        self.emit_discovery_change(before, sink);
        result
    }

    // ── Authentication ────────────────────────────────────────

    /// Validate the form and check the email is free, then wait for the
    /// simulated latency.
    pub fn register(
        &mut self,
        registration: Registration,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        validation::validate_registration(&registration, &self.config)?;
        if self.users.contains_email(&registration.email) {
            sink.emit(&AppEvent::AuthFailed(AuthError::DuplicateEmail));
            return Err(AuthError::DuplicateEmail.into());
        }
        let latency = self.config.auth_latency_ms;
        self.begin_auth(AuthRequest::Register(registration), latency, clock, sink)
    }

    pub fn login(
        &mut self,
        email: String,
        password: String,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        validation::validate_login(&email, &password)?;
        let latency = self.config.auth_latency_ms;
        self.begin_auth(AuthRequest::Login { email, password }, latency, clock, sink)
    }

    pub fn social_auth(
        &mut self,
        provider: AuthProvider,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let latency = self.config.social_auth_latency_ms;
        self.begin_auth(AuthRequest::Social(provider), latency, clock, sink)
    }

    fn begin_auth(
        &mut self,
        request: AuthRequest,
        latency_ms: u32,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let kind = request.kind();
        let ready_at = clock.now() + Duration::milliseconds(i64::from(latency_ms));
        if let Err(e) = self.session.begin_auth(request, ready_at) {
            sink.emit(&AppEvent::AuthFailed(e));
            return Err(e.into());
        }
        sink.emit(&AppEvent::AuthPending { kind });
        Ok(())
    }

    pub fn cancel_pending_auth(&mut self, sink: &mut impl EventSink) {
        if self.session.cancel_pending() {
            sink.emit(&AppEvent::AuthCancelled);
        }
    }

    /// Resolve the pending authentication once its latency has elapsed.
    ///
    /// Returns `Ok(true)` when a request was resolved successfully,
    /// `Ok(false)` when nothing was ready.
    pub fn poll_pending_auth(
        &mut self,
        store: &mut impl StoragePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<bool> {
        let now = clock.now();
        let Some(request) = self.session.take_ready(now) else {
            return Ok(false);
        };

        let radius = self.config.default_radius_km;
        let resolved = match request {
            AuthRequest::Login { email, password } => {
                self.users.authenticate(&email, &password, radius)
            }
            AuthRequest::Register(registration) => {
                let created = self
                    .users
                    .register(registration, new_id("user"), now, radius);
                if created.is_ok() {
                    persisted("users", persistence::save_users(store, self.users.users()));
                }
                created
            }
            AuthRequest::Social(provider) => {
                Ok(social_account(provider, new_id(provider_prefix(provider)), now, radius))
            }
        };

        match resolved {
            Ok(account) => {
                let before = self.discovery.state();
                self.sign_in(account, store, sink);
                self.emit_discovery_change(before, sink);
                Ok(true)
            }
            Err(e) => {
                warn!("AppService: authentication failed: {e}");
                sink.emit(&AppEvent::AuthFailed(e));
                Err(e.into())
            }
        }
    }

    fn sign_in(&mut self, account: Account, store: &mut impl StoragePort, sink: &mut impl EventSink) {
        if self.session.is_authenticated() {
            self.logout(store, sink);
        }
        let (account_id, provider, radius) =
            (account.id.clone(), account.provider, account.discovery_radius_km);
        self.session.login(account);
        persisted("session", persistence::save_session(store, self.session.current()));

        self.discovery.reset(
            radius,
            &inputs(&self.catalog, &self.ledger, &self.filter, &self.session),
        );
        sink.emit(&AppEvent::SignedIn {
            account_id,
            provider,
        });
    }

    /// Clear the session and drop this account's ratings.  The stored
    /// ratings record is rewritten to whatever the ledger still holds.
    pub fn logout(&mut self, store: &mut impl StoragePort, sink: &mut impl EventSink) {
        let Some(account) = self.session.logout() else {
            return;
        };
        let purged = self.ledger.purge_account(&mut self.catalog, &account.id);
        persisted("logout", persistence::clear_session(store, self.ledger.facts()));

        self.discovery.reset(
            self.config.default_radius_km,
            &inputs(&self.catalog, &self.ledger, &self.filter, &self.session),
        );
        sink.emit(&AppEvent::SignedOut {
            account_id: account.id,
            purged_ratings: purged,
        });
    }

    // ── Filters ───────────────────────────────────────────────

    /// Replace the selection wholesale; any focus is dropped.
    pub fn set_filter(&mut self, selection: FilterSelection, sink: &mut impl EventSink) {
        if self.filter.set(selection) {
            info!("AppService: filter now {:?}", selection);
        }
        self.discovery.filter_changed(&inputs(
            &self.catalog,
            &self.ledger,
            &self.filter,
            &self.session,
        ));
        sink.emit(&AppEvent::FilterChanged(selection));
    }

    // ── Rating ────────────────────────────────────────────────

    pub fn rate(
        &mut self,
        pet_id: &str,
        stars: Stars,
        store: &mut impl StoragePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<RateOutcome> {
        let account_id = self.session.require()?.id.clone();
        if !self.catalog.contains(pet_id) {
            return Err(Error::UnknownPet(pet_id.to_owned()));
        }

        let Some(fact) =
            self.ledger
                .rate(&mut self.catalog, &account_id, pet_id, stars, clock.now())
        else {
            debug!("AppService: {account_id} already rated {pet_id}");
            sink.emit(&AppEvent::RatingIgnored {
                pet_id: pet_id.to_owned(),
            });
            return Ok(RateOutcome::AlreadyRated);
        };
        persisted("ratings", persistence::save_ratings(store, self.ledger.facts()));

        if let Some(listing) = self.catalog.get(pet_id) {
            sink.emit(&AppEvent::Rated {
                pet_id: fact.pet_id,
                stars: fact.stars,
                rating: listing.rating,
                rating_count: listing.rating_count,
            });
        }

        let outcome = self.discovery.rated(pet_id);
        if outcome == RateOutcome::ReturnToBrowsing {
            self.clear_focus();
            sink.emit(&AppEvent::ReturnedToBrowsing);
        }
        Ok(outcome)
    }

    // ── Radius ────────────────────────────────────────────────

    pub fn set_radius(&mut self, km: u16, store: &mut impl StoragePort, sink: &mut impl EventSink) {
        let before = self.discovery.radius_km();
        let km = self.discovery.set_radius(
            km,
            &self.config,
            &inputs(&self.catalog, &self.ledger, &self.filter, &self.session),
        );
        if km != before {
            self.radius_changed(km, store, sink);
        }
    }

    pub fn increase_radius(&mut self, store: &mut impl StoragePort, sink: &mut impl EventSink) {
        let widened = self.discovery.increase_radius(
            &self.config,
            &inputs(&self.catalog, &self.ledger, &self.filter, &self.session),
        );
        if let Some(km) = widened {
            self.radius_changed(km, store, sink);
        }
    }

    /// Mirror a new radius into the session account and its stored record.
    fn radius_changed(&mut self, km: u16, store: &mut impl StoragePort, sink: &mut impl EventSink) {
        if let Some(account) = self.session.current_mut() {
            account.discovery_radius_km = km;
            if self.users.update_radius(&account.id, km) {
                persisted("users", persistence::save_users(store, self.users.users()));
            }
        }
        persisted("session", persistence::save_session(store, self.session.current()));
        sink.emit(&AppEvent::RadiusChanged { radius_km: km });
    }

    pub fn go_global(&mut self, sink: &mut impl EventSink) {
        self.discovery.go_global(&inputs(
            &self.catalog,
            &self.ledger,
            &self.filter,
            &self.session,
        ));
        sink.emit(&AppEvent::GlobalSearchEnabled);
    }

    // ── Focus ─────────────────────────────────────────────────

    pub fn focus_pet(&mut self, pet_id: &str) -> Result<()> {
        let focused = self.discovery.focus(
            pet_id,
            &inputs(&self.catalog, &self.ledger, &self.filter, &self.session),
        );
        if focused {
            Ok(())
        } else {
            Err(Error::UnknownPet(pet_id.to_owned()))
        }
    }

    pub fn clear_focus(&mut self) {
        self.discovery.clear_focus(&inputs(
            &self.catalog,
            &self.ledger,
            &self.filter,
            &self.session,
        ));
    }

    // ── Profile ───────────────────────────────────────────────

    /// Validate the add-pet form and list the pet under the session account.
    pub fn add_pet(
        &mut self,
        draft: PetDraft,
        store: &mut impl StoragePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<PetId> {
        let owner_id = self.session.require()?.id.clone();
        let pet = validation::validate_pet(draft, &self.config)?;

        let id = new_id("pet");
        let listing = PetListing {
            id: id.clone(),
            name: pet.name,
            age: pet.age,
            pet_type: pet.pet_type,
            breed: pet.breed,
            purpose: pet.purpose,
            price: pet.price,
            sex: pet.sex,
            location: pet.location,
            description: pet.description,
            phone: pet.phone,
            images: pet.images,
            rating: 0.0,
            rating_count: 0,
            featured: false,
            owner_id: owner_id.clone(),
            created_at: clock.now(),
        };
        self.catalog.insert(listing);

        if let Some(account) = self.session.current_mut() {
            account.pet_ids.push(id.clone());
        }
        if self.users.add_pet(&owner_id, id.clone()) {
            persisted("users", persistence::save_users(store, self.users.users()));
        }
        persisted("session", persistence::save_session(store, self.session.current()));

        self.refresh_discovery();
        info!("AppService: {owner_id} listed {id}");
        sink.emit(&AppEvent::PetListed { pet_id: id.clone() });
        Ok(id)
    }

    // ── Projections ───────────────────────────────────────────

    pub fn discover_view(&self) -> DiscoverView {
        let ctx = self.discovery.context();
        let current = self.discovery.current().and_then(|id| self.catalog.get(id));
        let my_rating = match (self.session.current(), current) {
            (Some(account), Some(pet)) => self.ledger.rating_of(&account.id, &pet.id),
            _ => None,
        };
        DiscoverView {
            state: self.discovery.state(),
            current: current.cloned(),
            position: ctx.cursor,
            total: ctx.candidates.len(),
            can_rate: self.session.is_authenticated() && current.is_some() && my_rating.is_none(),
            my_rating,
            filter: self.filter.active(),
            radius_km: ctx.radius_km,
            global: ctx.global,
            can_increase_radius: ctx.radius_km < self.config.max_radius_km,
        }
    }

    /// `None` while signed out.
    pub fn profile_view(&self) -> Option<ProfileView> {
        let account = self.session.current()?;
        let pets: Vec<PetListing> = self.catalog.owned_by(account).cloned().collect();
        Some(ProfileView {
            stats: ProfileStats::of(&pets),
            account: account.clone(),
            pets,
            min_radius_km: self.config.min_radius_km,
            max_radius_km: self.config.max_radius_km,
        })
    }

    pub fn top_picks_view(&self) -> TopPicksView {
        let limit = self.config.top_picks_limit;
        TopPicksView {
            featured: self.catalog.featured(limit).into_iter().cloned().collect(),
            top_rated: self.catalog.top_rated(limit).into_iter().cloned().collect(),
        }
    }

    pub fn explore_view(&self) -> ExploreView {
        ExploreView::new(self.filter.active())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn current_account(&self) -> Option<&Account> {
        self.session.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// An authentication request is waiting on its simulated latency.
    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn discovery_state(&self) -> DiscoveryState {
        self.discovery.state()
    }

    pub fn catalog(&self) -> &PetCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &RatingLedger {
        &self.ledger
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn session_radius(&self) -> u16 {
        self.session
            .current()
            .map_or(self.config.default_radius_km, |a| {
                self.config.clamp_radius(a.discovery_radius_km)
            })
    }

    fn refresh_discovery(&mut self) {
        self.discovery.recompute(&inputs(
            &self.catalog,
            &self.ledger,
            &self.filter,
            &self.session,
        ));
    }

    fn emit_discovery_change(&self, before: DiscoveryState, sink: &mut impl EventSink) {
        let after = self.discovery.state();
        if after != before {
            sink.emit(&AppEvent::DiscoveryChanged {
                from: before,
                to: after,
            });
        }
    }
}

fn provider_prefix(provider: AuthProvider) -> &'static str {
    match provider {
        AuthProvider::Google => "google",
        AuthProvider::Facebook => "facebook",
        AuthProvider::Email => "user",
    }
}
