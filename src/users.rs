//! User store: the local registry of email/password accounts.
//!
//! Credentials are plaintext and compared with exact string equality,
//! including the email (no case folding).  The store is only consulted while
//! registering or signing in; the controller persists the `users` record
//! after every mutation.

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::error::AuthError;
use crate::model::{Account, AccountId, AuthProvider, Coordinates, Location, PetId, StoredUser};

/// Fields submitted by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub country: String,
    pub state: String,
    pub city: String,
}

impl Registration {
    /// Location for the new account.  Blank fields fall back to the default
    /// home location one by one.
    fn location(&self) -> Location {
        let home = Location::default_home();
        let pick = |value: &str, fallback: String| {
            if value.trim().is_empty() {
                fallback
            } else {
                value.trim().to_owned()
            }
        };
        Location {
            country: pick(&self.country, home.country),
            state: pick(&self.state, home.state),
            city: pick(&self.city, home.city),
            coordinates: Some(Coordinates::LOS_ANGELES),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct UserStore {
    users: Vec<StoredUser>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: Vec<StoredUser>) -> Self {
        Self { users }
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.account.email == email)
    }

    /// Create an account.  Fails with [`AuthError::DuplicateEmail`] and
    /// leaves the store untouched if the email is taken.
    pub fn register(
        &mut self,
        registration: Registration,
        id: AccountId,
        now: DateTime<Utc>,
        radius_km: u16,
    ) -> Result<Account, AuthError> {
        if self.contains_email(&registration.email) {
            warn!("users: registration refused, email already present");
            return Err(AuthError::DuplicateEmail);
        }

        let account = Account {
            id,
            name: registration.name.trim().to_owned(),
            email: registration.email.clone(),
            avatar: None,
            provider: AuthProvider::Email,
            location: registration.location(),
            discovery_radius_km: radius_km,
            pet_ids: Vec::new(),
            created_at: now,
        };
        self.users.push(StoredUser {
            account: account.clone(),
            password: registration.password,
        });
        info!("users: registered {}", account.id);
        Ok(account)
    }

    /// Look up the account matching both `email` and `password`.
    ///
    /// A stored radius of zero (older records) is reported as `default_radius_km`.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        default_radius_km: u16,
    ) -> Result<Account, AuthError> {
        let user = self
            .users
            .iter()
            .find(|u| u.account.email == email && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let mut account = user.account.clone();
        account.provider = AuthProvider::Email;
        if account.discovery_radius_km == 0 {
            account.discovery_radius_km = default_radius_km;
        }
        Ok(account)
    }

    /// Keep the stored radius in step with the session.  `false` if the
    /// account is not in this store (e.g. social sign-in).
    pub fn update_radius(&mut self, account_id: &str, radius_km: u16) -> bool {
        match self.find_mut(account_id) {
            Some(user) => {
                user.account.discovery_radius_km = radius_km;
                true
            }
            None => false,
        }
    }

    /// Record ownership of a newly listed pet.
    pub fn add_pet(&mut self, account_id: &str, pet_id: PetId) -> bool {
        match self.find_mut(account_id) {
            Some(user) => {
                if !user.account.owns(&pet_id) {
                    user.account.pet_ids.push(pet_id);
                }
                true
            }
            None => false,
        }
    }

    pub fn users(&self) -> &[StoredUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find_mut(&mut self, account_id: &str) -> Option<&mut StoredUser> {
        self.users.iter_mut().find(|u| u.account.id == account_id)
    }
}
