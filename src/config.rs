//! Application configuration parameters
//!
//! All tunable parameters for the PetMatch core.
//! Values can be overridden through the `config` record in storage.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // --- Discovery radius ---
    /// Radius given to newly created accounts (km)
    pub default_radius_km: u16,
    /// Smallest radius the profile slider allows (km)
    pub min_radius_km: u16,
    /// Largest radius reachable by any means (km)
    pub max_radius_km: u16,
    /// Step applied by "increase radius" from the exhausted screen (km)
    pub radius_step_km: u16,

    // --- Forms ---
    /// Minimum password length at registration
    pub min_password_len: usize,
    /// Maximum number of images on one listing
    pub max_images: usize,

    // --- Top picks ---
    /// Entries shown in each top-picks row
    pub top_picks_limit: usize,

    // --- Simulated latency ---
    /// Delay before an email login / registration resolves (milliseconds)
    pub auth_latency_ms: u32,
    /// Delay before a social sign-in resolves (milliseconds)
    pub social_auth_latency_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Radius
            default_radius_km: 50,
            min_radius_km: 5,
            max_radius_km: 200,
            radius_step_km: 50,

            // Forms
            min_password_len: 6,
            max_images: 5,

            // Top picks
            top_picks_limit: 6,

            // Latency
            auth_latency_ms: 1000,
            social_auth_latency_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Clamp `km` into the slider range.
    pub fn clamp_radius(&self, km: u16) -> u16 {
        km.clamp(self.min_radius_km, self.max_radius_km)
    }
}

/// Range-check every field.  Called before any config is persisted.
pub fn validate_config(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.min_radius_km == 0 {
        return Err(ConfigError::ValidationFailed("min_radius_km must be > 0"));
    }
    if cfg.min_radius_km > cfg.max_radius_km {
        return Err(ConfigError::ValidationFailed(
            "min_radius_km must be <= max_radius_km",
        ));
    }
    if !(cfg.min_radius_km..=cfg.max_radius_km).contains(&cfg.default_radius_km) {
        return Err(ConfigError::ValidationFailed(
            "default_radius_km must lie within min..=max",
        ));
    }
    if cfg.radius_step_km == 0 {
        return Err(ConfigError::ValidationFailed("radius_step_km must be > 0"));
    }
    if !(1..=64).contains(&cfg.min_password_len) {
        return Err(ConfigError::ValidationFailed(
            "min_password_len must be 1–64",
        ));
    }
    if !(1..=crate::model::MAX_IMAGES).contains(&cfg.max_images) {
        return Err(ConfigError::ValidationFailed("max_images must be 1–5"));
    }
    if cfg.top_picks_limit == 0 {
        return Err(ConfigError::ValidationFailed("top_picks_limit must be > 0"));
    }
    if cfg.auth_latency_ms > 30_000 || cfg.social_auth_latency_ms > 30_000 {
        return Err(ConfigError::ValidationFailed(
            "auth latencies must be <= 30000 ms",
        ));
    }
    Ok(())
}
