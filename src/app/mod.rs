//! Application core: orchestration, zero I/O.
//!
//! [`service::AppService`] turns [`commands::Intent`]s into domain
//! transitions and [`events::AppEvent`]s, and projects state into
//! per-screen [`views`].  Storage, time and event delivery happen through
//! the **port traits** in [`ports`].

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod views;
