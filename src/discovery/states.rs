//! Concrete discovery state handlers and the table builder.
//!
//! ```text
//!  BROWSING ──[focus set]──────────▶ FOCUSED
//!     │  ▲                              │
//!  [empty] [candidates back]      [focus cleared]
//!     ▼  │                              │
//!  EXHAUSTED ◀────[empty]───────────────┘
//!
//!  Any state ──[focus set]──▶ FOCUSED
//! ```

use super::context::DiscoveryContext;
use super::{DiscoveryState, StateDescriptor};
use log::{debug, info};

/// Build the static state table.
pub fn build_state_table() -> [StateDescriptor; DiscoveryState::COUNT] {
    [
        StateDescriptor {
            id: DiscoveryState::Browsing,
            name: "Browsing",
            on_enter: Some(browsing_enter),
            on_exit: Some(browsing_exit),
            on_update: browsing_update,
        },
        StateDescriptor {
            id: DiscoveryState::Focused,
            name: "Focused",
            on_enter: Some(focused_enter),
            on_exit: Some(focused_exit),
            on_update: focused_update,
        },
        StateDescriptor {
            id: DiscoveryState::Exhausted,
            name: "Exhausted",
            on_enter: Some(exhausted_enter),
            on_exit: Some(exhausted_exit),
            on_update: exhausted_update,
        },
    ]
}

// ── Browsing ──────────────────────────────────────────────────────────────

fn browsing_enter(ctx: &mut DiscoveryContext) {
    debug!("BROWSING: {} candidates", ctx.candidates.len());
}

fn browsing_exit(ctx: &mut DiscoveryContext) {
    debug!("BROWSING: leaving at position {}", ctx.cursor);
}

fn browsing_update(ctx: &mut DiscoveryContext) -> Option<DiscoveryState> {
    if ctx.is_focused() {
        return Some(DiscoveryState::Focused);
    }
    if !ctx.has_candidates() {
        return Some(DiscoveryState::Exhausted);
    }
    None
}

// ── Focused ───────────────────────────────────────────────────────────────

fn focused_enter(ctx: &mut DiscoveryContext) {
    ctx.cursor = 0;
    if let Some(id) = &ctx.focused {
        info!("FOCUSED: presenting {id}");
    }
}

fn focused_exit(_ctx: &mut DiscoveryContext) {
    debug!("FOCUSED: back to general browsing");
}

fn focused_update(ctx: &mut DiscoveryContext) -> Option<DiscoveryState> {
    if ctx.is_focused() {
        return None;
    }
    if ctx.has_candidates() {
        Some(DiscoveryState::Browsing)
    } else {
        Some(DiscoveryState::Exhausted)
    }
}

// ── Exhausted ─────────────────────────────────────────────────────────────

fn exhausted_enter(ctx: &mut DiscoveryContext) {
    ctx.cursor = 0;
    if ctx.global {
        info!("EXHAUSTED: no unrated candidates left, search is already global");
    } else {
        info!(
            "EXHAUSTED: no unrated candidates within {} km",
            ctx.radius_km
        );
    }
}

fn exhausted_exit(ctx: &mut DiscoveryContext) {
    info!(
        "EXHAUSTED: {} candidates available again",
        ctx.candidates.len()
    );
}

fn exhausted_update(ctx: &mut DiscoveryContext) -> Option<DiscoveryState> {
    if ctx.is_focused() {
        return Some(DiscoveryState::Focused);
    }
    if ctx.has_candidates() {
        return Some(DiscoveryState::Browsing);
    }
    None
}
