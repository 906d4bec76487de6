//! Discovery engine: which pet to present next.
//!
//! A function-pointer state machine over three states:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  StateTable                                               │
//! │  ┌───────────┬──────────┬──────────┬─────────────────────┐ │
//! │  │ State     │ on_enter │ on_exit  │ on_update           │ │
//! │  ├───────────┼──────────┼──────────┼─────────────────────┤ │
//! │  │ Browsing  │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<>   │ │
//! │  │ Focused   │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<>   │ │
//! │  │ Exhausted │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<>   │ │
//! │  └───────────┴──────────┴──────────┴─────────────────────┘ │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no clock tick.  Every operation that mutates the
//! [`DiscoveryContext`] ends with [`DiscoveryFsm::settle`], which runs
//! `on_update` for the current state and follows transitions until one
//! returns `None`.
//!
//! The candidate set itself is a pure function of catalog, filter, ledger,
//! account and radius knobs ([`browsing_candidates`]).

pub mod context;
pub mod states;

use context::DiscoveryContext;
use log::{debug, info, warn};

use crate::catalog::PetCatalog;
use crate::config::AppConfig;
use crate::filter::FilterSelection;
use crate::ledger::RatingLedger;
use crate::model::{PetId, PetListing};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DiscoveryState {
    Browsing = 0,
    Focused = 1,
    Exhausted = 2,
}

impl DiscoveryState {
    pub const COUNT: usize = 3;

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Browsing,
            1 => Self::Focused,
            2 => Self::Exhausted,
            _ => {
                debug_assert!(false, "invalid discovery state index: {idx}");
                Self::Browsing
            }
        }
    }
}

pub type StateActionFn = fn(&mut DiscoveryContext);

/// Returns `Some(next)` to transition, `None` to stay.
pub type StateUpdateFn = fn(&mut DiscoveryContext) -> Option<DiscoveryState>;

pub struct StateDescriptor {
    pub id: DiscoveryState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct DiscoveryFsm {
    table: [StateDescriptor; DiscoveryState::COUNT],
    current: usize,
    transitions: u64,
}

impl DiscoveryFsm {
    pub fn new(table: [StateDescriptor; DiscoveryState::COUNT], initial: DiscoveryState) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter`, then settle.
    pub fn start(&mut self, ctx: &mut DiscoveryContext) {
        debug!("discovery starting in {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
        self.settle(ctx);
    }

    /// Follow `on_update` transitions until the current state is stable.
    pub fn settle(&mut self, ctx: &mut DiscoveryContext) {
        for _ in 0..=DiscoveryState::COUNT {
            match (self.table[self.current].on_update)(ctx) {
                Some(next) if next as usize != self.current => self.transition(next, ctx),
                _ => return,
            }
        }
        warn!(
            "discovery: no stable state after {} steps, staying in {}",
            DiscoveryState::COUNT + 1,
            self.table[self.current].name
        );
    }

    pub fn current_state(&self) -> DiscoveryState {
        DiscoveryState::from_index(self.current)
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    fn transition(&mut self, next: DiscoveryState, ctx: &mut DiscoveryContext) {
        let next_idx = next as usize;
        debug!(
            "discovery: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }
        self.current = next_idx;
        self.transitions += 1;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate computation
// ---------------------------------------------------------------------------

/// Everything outside the engine that the candidate set depends on.
#[derive(Clone, Copy)]
pub struct DiscoveryInputs<'a> {
    pub catalog: &'a PetCatalog,
    pub ledger: &'a RatingLedger,
    pub filter: FilterSelection,
    /// Signed-in account; `None` excludes nothing.
    pub account_id: Option<&'a str>,
}

/// Geographic predicate applied alongside the category filter.
///
/// Distance is not enforced: radius and the global flag only reset
/// discovery.  Real geo filtering belongs here.
pub fn within_radius(_listing: &PetListing, _radius_km: u16, _global: bool) -> bool {
    true
}

/// Browsing candidates: catalog ∩ filter ∩ radius − already rated, in
/// catalog order.
pub fn browsing_candidates(inputs: &DiscoveryInputs<'_>, radius_km: u16, global: bool) -> Vec<PetId> {
    inputs
        .catalog
        .iter()
        .filter(|p| inputs.filter.matches(p))
        .filter(|p| within_radius(p, radius_km, global))
        .filter(|p| {
            inputs
                .account_id
                .is_none_or(|acct| !inputs.ledger.has_rated(acct, &p.id))
        })
        .map(|p| p.id.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Engine facade
// ---------------------------------------------------------------------------

/// What a successful rating did to the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateOutcome {
    /// Browsing continues at `next`.
    Advanced { next: PetId },
    /// The rated pet was the last candidate.
    Exhausted,
    /// Rated from Focused mode; the caller clears focus.
    ReturnToBrowsing,
    /// The account had already rated this pet; nothing changed.
    AlreadyRated,
}

pub struct DiscoveryEngine {
    fsm: DiscoveryFsm,
    ctx: DiscoveryContext,
}

impl DiscoveryEngine {
    pub fn new(radius_km: u16) -> Self {
        let mut engine = Self {
            fsm: DiscoveryFsm::new(states::build_state_table(), DiscoveryState::Browsing),
            ctx: DiscoveryContext::new(radius_km),
        };
        engine.fsm.start(&mut engine.ctx);
        engine
    }

    pub fn state(&self) -> DiscoveryState {
        self.fsm.current_state()
    }

    pub fn context(&self) -> &DiscoveryContext {
        &self.ctx
    }

    pub fn current(&self) -> Option<&PetId> {
        self.ctx.current()
    }

    pub fn focused(&self) -> Option<&PetId> {
        self.ctx.focused.as_ref()
    }

    pub fn radius_km(&self) -> u16 {
        self.ctx.radius_km
    }

    pub fn is_global(&self) -> bool {
        self.ctx.global
    }

    /// Start over for a (new) account: no focus, local search at `radius_km`.
    pub fn reset(&mut self, radius_km: u16, inputs: &DiscoveryInputs<'_>) {
        self.ctx.focused = None;
        self.ctx.global = false;
        self.ctx.radius_km = radius_km;
        self.recompute(inputs);
    }

    /// Rebuild the candidate set from `inputs` and rewind the cursor.
    ///
    /// A focused pet that has left the catalog is dropped.
    pub fn recompute(&mut self, inputs: &DiscoveryInputs<'_>) {
        let candidates = match &self.ctx.focused {
            Some(id) if inputs.catalog.contains(id) => vec![id.clone()],
            Some(id) => {
                warn!("discovery: focused pet {id} not in catalog, focus dropped");
                self.ctx.focused = None;
                browsing_candidates(inputs, self.ctx.radius_km, self.ctx.global)
            }
            None => browsing_candidates(inputs, self.ctx.radius_km, self.ctx.global),
        };
        self.ctx.replace_candidates(candidates);
        self.fsm.settle(&mut self.ctx);
    }

    /// Present exactly `pet_id`.  `false` if it is not in the catalog.
    pub fn focus(&mut self, pet_id: &str, inputs: &DiscoveryInputs<'_>) -> bool {
        if !inputs.catalog.contains(pet_id) {
            debug!("discovery: focus on unknown pet {pet_id} ignored");
            return false;
        }
        self.ctx.focused = Some(pet_id.to_owned());
        self.recompute(inputs);
        true
    }

    /// Back to general browsing.  Returns whether a focus was set.
    pub fn clear_focus(&mut self, inputs: &DiscoveryInputs<'_>) -> bool {
        let had = self.ctx.focused.take().is_some();
        self.recompute(inputs);
        had
    }

    /// New filter selection: focus is dropped and browsing restarts.
    pub fn filter_changed(&mut self, inputs: &DiscoveryInputs<'_>) {
        self.ctx.focused = None;
        self.recompute(inputs);
    }

    /// Next candidate, wrapping.  No-op outside Browsing.
    pub fn advance_cursor(&mut self) {
        if self.state() == DiscoveryState::Browsing {
            self.ctx.advance();
        }
    }

    /// Radius from the profile slider, clamped into the configured range.
    /// Recomputes only when the value changes.  Returns the new radius.
    pub fn set_radius(&mut self, km: u16, config: &AppConfig, inputs: &DiscoveryInputs<'_>) -> u16 {
        let km = config.clamp_radius(km);
        if km != self.ctx.radius_km {
            info!("discovery: radius {} -> {} km", self.ctx.radius_km, km);
            self.ctx.radius_km = km;
            self.recompute(inputs);
        }
        km
    }

    /// One step wider, capped.  `Some(new)` if the radius changed.
    pub fn increase_radius(&mut self, config: &AppConfig, inputs: &DiscoveryInputs<'_>) -> Option<u16> {
        let km = self
            .ctx
            .radius_km
            .saturating_add(config.radius_step_km)
            .min(config.max_radius_km);
        if km == self.ctx.radius_km {
            debug!("discovery: radius already at {km} km cap");
            return None;
        }
        info!("discovery: radius widened {} -> {} km", self.ctx.radius_km, km);
        self.ctx.radius_km = km;
        self.recompute(inputs);
        Some(km)
    }

    /// Lift the radius constraint.
    pub fn go_global(&mut self, inputs: &DiscoveryInputs<'_>) {
        info!("discovery: global search enabled");
        self.ctx.global = true;
        self.recompute(inputs);
    }

    /// Update the presentation after `pet_id` was rated.
    pub fn rated(&mut self, pet_id: &str) -> RateOutcome {
        match self.state() {
            DiscoveryState::Focused => RateOutcome::ReturnToBrowsing,
            DiscoveryState::Browsing | DiscoveryState::Exhausted => {
                self.ctx.remove_candidate(pet_id);
                self.fsm.settle(&mut self.ctx);
                match self.ctx.current() {
                    Some(next) if self.state() == DiscoveryState::Browsing => {
                        RateOutcome::Advanced { next: next.clone() }
                    }
                    _ => RateOutcome::Exhausted,
                }
            }
        }
    }
}
