//! Inbound intents to the application service.
//!
//! One variant per user action the presentation layer can raise.  The
//! [`AppService`](super::service::AppService) applies each one to
//! completion before the next is accepted.

use crate::filter::{Category, FilterSelection};
use crate::model::{AuthProvider, PetId, Stars};
use crate::users::Registration;
use crate::validation::PetDraft;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // ── Authentication ────────────────────────────────────────
    /// Create an email account.  Resolves after the simulated latency.
    Register(Registration),

    /// Email sign-in.  Resolves after the simulated latency.
    Login { email: String, password: String },

    /// Sign in through a social provider (simulated identity).
    SocialAuth(AuthProvider),

    /// Abandon the authentication request in flight.
    CancelPendingAuth,

    Logout,

    // ── Filters ───────────────────────────────────────────────
    /// Replace the active selection wholesale.
    SetFilter(FilterSelection),

    /// Click on an explore category (toggle semantics).
    ToggleCategory(Category),

    ClearFilters,

    // ── Discovery ─────────────────────────────────────────────
    Rate { pet_id: PetId, stars: Stars },

    /// Profile slider value.  Clamped into the configured range.
    SetRadius(u16),

    /// Recovery action offered when candidates are exhausted.
    IncreaseRadius,

    /// Recovery action: lift the radius constraint.
    GoGlobal,

    /// Present one listing outside normal browsing (e.g. from top picks).
    FocusPet(PetId),

    ClearFocus,

    /// "Next" without rating.
    AdvanceCursor,

    // ── Profile ───────────────────────────────────────────────
    /// Submit the add-pet form.
    AddPet(PetDraft),
}

impl Intent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Login { .. } => "login",
            Self::SocialAuth(_) => "social_auth",
            Self::CancelPendingAuth => "cancel_pending_auth",
            Self::Logout => "logout",
            Self::SetFilter(_) => "set_filter",
            Self::ToggleCategory(_) => "toggle_category",
            Self::ClearFilters => "clear_filters",
            Self::Rate { .. } => "rate",
            Self::SetRadius(_) => "set_radius",
            Self::IncreaseRadius => "increase_radius",
            Self::GoGlobal => "go_global",
            Self::FocusPet(_) => "focus_pet",
            Self::ClearFocus => "clear_focus",
            Self::AdvanceCursor => "advance_cursor",
            Self::AddPet(_) => "add_pet",
        }
    }

    /// Intents accepted without a signed-in account.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Register(_)
                | Self::Login { .. }
                | Self::SocialAuth(_)
                | Self::CancelPendingAuth
        )
    }
}
