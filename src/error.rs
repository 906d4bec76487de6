//! Unified error types for the PetMatch core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! controller's error handling uniform.  Nothing here is fatal: every variant
//! describes a rejected intent, and the session carries on in a safe state.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible intent in the core funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more form fields were missing or invalid.
    Validation(ValidationErrors),
    /// Authentication or session gating rejected the intent.
    Auth(AuthError),
    /// A referenced listing does not exist in the catalog.
    UnknownPet(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Auth(e) => write!(f, "auth: {e}"),
            Self::UnknownPet(id) => write!(f, "unknown pet: {id}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Authentication errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// An account with the same email is already registered.
    DuplicateEmail,
    /// No account matches the email / password pair.
    InvalidCredentials,
    /// Another authentication attempt is still in flight.
    Busy,
    /// The intent requires an active session.
    NotAuthenticated,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "user with this email already exists"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Busy => write!(f, "authentication already in progress"),
            Self::NotAuthenticated => write!(f, "not signed in"),
        }
    }
}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Form fields that can fail validation.  Reported inline, one message each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    PetType,
    Breed,
    Age,
    Sex,
    Purpose,
    Country,
    State,
    City,
    Images,
    Price,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::PetType => "petType",
            Self::Breed => "breed",
            Self::Age => "age",
            Self::Sex => "sex",
            Self::Purpose => "purpose",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Images => "images",
            Self::Price => "price",
        };
        f.write_str(name)
    }
}

/// A single field-level problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field problem found in one submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for `field`, if that field failed.
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was pushed, otherwise the collected errors.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for Error {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Persisted-state errors
// ---------------------------------------------------------------------------

/// Failures while loading a persisted record.  These never reach the user:
/// the persistence adapter logs them and falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// The record exists but could not be decoded.
    Corrupt { key: &'static str, reason: String },
    /// The storage backend failed.
    Storage(&'static str),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupt { key, reason } => write!(f, "record '{key}' corrupt: {reason}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
