//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod outcome;
pub mod progress;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{
    dangerous_contacts, find_consumable, hazard_is_dangerous, is_consumable_tier, knockback,
    overlaps,
};
pub use outcome::{LevelOutcome, SessionScore, level_won};
pub use progress::{ConsumeOutcome, ItemType, PlayerProgress};
pub use scoring::{item_points, star_rating};
pub use state::{EdibleItem, GameEvent, GamePhase, GameState, Hazard, Player};
pub use tick::{TickInput, tick};
