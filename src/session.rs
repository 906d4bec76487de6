//! Session state: the one signed-in account, plus the single in-flight
//! authentication slot.
//!
//! The session is an explicit value owned by the controller, never ambient
//! global state.  Authentication goes through a pending slot that models the
//! simulated network delay:
//!
//! ```text
//!   Idle ──begin_auth──▶ Pending{ready_at} ──take_ready(now ≥ ready_at)──▶ Idle
//!     ▲                        │
//!     └─────cancel_pending─────┘
//! ```
//!
//! While a request is pending, further `begin_auth` calls are refused with
//! [`AuthError::Busy`]; they are never queued or interleaved.

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::error::AuthError;
use crate::model::{Account, AccountId, AuthProvider, Location};
use crate::users::Registration;

/// Which authentication the user triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login { email: String, password: String },
    Register(Registration),
    Social(AuthProvider),
}

impl AuthRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register(_) => "register",
            Self::Social(_) => "social",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuth {
    pub request: AuthRequest,
    pub ready_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone)]
pub struct SessionState {
    account: Option<Account>,
    pending: Option<PendingAuth>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Identity ──────────────────────────────────────────────

    /// Make `account` the session identity, replacing any previous one.
    pub fn login(&mut self, account: Account) {
        info!("session: signed in as {}", account.id);
        self.account = Some(account);
    }

    /// Clear the identity.  Returns the account that was signed in.
    pub fn logout(&mut self) -> Option<Account> {
        let prev = self.account.take();
        if let Some(a) = &prev {
            info!("session: signed out {}", a.id);
        }
        prev
    }

    pub fn current(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Account> {
        self.account.as_mut()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    /// The signed-in account, or [`AuthError::NotAuthenticated`].
    pub fn require(&self) -> Result<&Account, AuthError> {
        self.account.as_ref().ok_or(AuthError::NotAuthenticated)
    }

    // ── Pending authentication slot ───────────────────────────

    /// Occupy the slot.  Refused while another request is in flight.
    pub fn begin_auth(
        &mut self,
        request: AuthRequest,
        ready_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if let Some(p) = &self.pending {
            debug!(
                "session: {} ignored, {} still pending",
                request.kind(),
                p.request.kind()
            );
            return Err(AuthError::Busy);
        }
        debug!("session: {} pending until {}", request.kind(), ready_at);
        self.pending = Some(PendingAuth { request, ready_at });
        Ok(())
    }

    /// Release and return the pending request once `now` has reached its
    /// deadline.  `None` while idle or still waiting.
    pub fn take_ready(&mut self, now: DateTime<Utc>) -> Option<AuthRequest> {
        match &self.pending {
            Some(p) if now >= p.ready_at => self.pending.take().map(|p| p.request),
            _ => None,
        }
    }

    /// Drop the pending request, if any.
    pub fn cancel_pending(&mut self) -> bool {
        let had = self.pending.take().is_some();
        if had {
            info!("session: pending authentication cancelled");
        }
        had
    }

    pub fn pending(&self) -> Option<&PendingAuth> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// Identity handed back by a simulated social provider.
///
/// Social accounts are not written to the user store.
pub fn social_account(
    provider: AuthProvider,
    id: AccountId,
    now: DateTime<Utc>,
    radius_km: u16,
) -> Account {
    let (name, email) = match provider {
        AuthProvider::Facebook => ("Jane Smith", "jane@facebook.com"),
        AuthProvider::Google | AuthProvider::Email => ("John Doe", "john@gmail.com"),
    };
    Account {
        id,
        name: name.to_owned(),
        email: email.to_owned(),
        avatar: Some(
            "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=100"
                .to_owned(),
        ),
        provider,
        location: Location::default_home(),
        discovery_radius_km: radius_km,
        pet_ids: Vec::new(),
        created_at: now,
    }
}
