//! Munch - A grow-by-eating arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (progression, scoring, collisions, game state)
//! - `tuning`: Data-driven game balance (tier table, scoring bounds, star thresholds)
//! - `hud`: Per-frame HUD snapshot for the presentation layer
//! - `platform`: Frame pacing, headless runner, and the browser bridge

pub mod hud;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use hud::HudSnapshot;
pub use tuning::{TierDefinition, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player defaults
    pub const PLAYER_INITIAL_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Mouth distance from center as a fraction of player size
    pub const MOUTH_OFFSET: f32 = 0.7;
    /// Speed the player is pushed away from a dangerous hazard (units/s)
    pub const KNOCKBACK_SPEED: f32 = 300.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 1200.0;

    /// Distinct item types spawned per tier (ids 0..ITEM_TYPES)
    pub const ITEM_TYPES: u8 = 10;
    /// Scoring/spawn density for a tier with no configured entry
    pub const DEFAULT_TIER_DENSITY: u32 = 10;
    /// Per-consumption decay base for repeated item types
    pub const SCORE_DECAY_BASE: f64 = 0.9;

    /// Item sprite radius = ITEM_BASE_SIZE + tier * ITEM_SIZE_PER_TIER
    pub const ITEM_BASE_SIZE: f32 = 8.0;
    pub const ITEM_SIZE_PER_TIER: f32 = 3.0;
    /// Hazard sprite radius = HAZARD_BASE_SIZE + tier * HAZARD_SIZE_PER_TIER
    pub const HAZARD_BASE_SIZE: f32 = 15.0;
    pub const HAZARD_SIZE_PER_TIER: f32 = 5.0;
    /// Hazard drift speed range per axis
    pub const HAZARD_MAX_DRIFT: f32 = 50.0;

    /// Spawn margins from the world edge
    pub const ITEM_SPAWN_MARGIN: f32 = 50.0;
    pub const HAZARD_SPAWN_MARGIN: f32 = 100.0;
}
