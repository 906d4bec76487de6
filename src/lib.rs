//! PetMatch client core.
//!
//! The in-memory state machine behind the PetMatch app: accounts and
//! session, the pet catalog, the rating ledger, category filters and the
//! discovery engine that decides which pet to show next.  Presentation and
//! storage technology stay outside; they talk to [`app::service::AppService`]
//! through intents, views and the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod model;
pub mod persistence;
pub mod session;
pub mod users;
pub mod validation;

pub use error::{Error, Result};
