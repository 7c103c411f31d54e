//! Game state and core simulation types
//!
//! All state owned by a running session lives in [`GameState`]. The session
//! loop is its only mutator.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::outcome::{LevelOutcome, SessionScore};
use super::progress::{ItemType, PlayerProgress};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused (no mutation, clock stopped)
    Paused,
    /// Level complete; all gameplay mutation is disabled
    Ended,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ItemConsumed {
        tier: u32,
        item_type: ItemType,
        points: u32,
    },
    HazardHit {
        hazard_id: u32,
        penalty: u32,
    },
    /// Player grew; camera zoom and flash key off this
    TierAdvanced { tier: u32 },
    /// Items of a tier too small to matter were removed
    ItemsDespawned { tier: u32, count: usize },
    LevelComplete(LevelOutcome),
}

/// The player's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Unit vector the mouth points along
    pub facing: Vec2,
    /// Velocity applied on the next integration step instead of input
    #[serde(default)]
    pub knockback: Option<Vec2>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            // Facing up (screen space, y grows downward)
            facing: Vec2::NEG_Y,
            knockback: None,
        }
    }

    /// Mouth hitbox center for a player of the given size
    pub fn mouth(&self, size: f32, mouth_offset: f32) -> Vec2 {
        self.pos + self.facing * size * mouth_offset
    }
}

/// Something to eat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdibleItem {
    pub id: u32,
    pub tier: u32,
    pub item_type: ItemType,
    pub pos: Vec2,
}

impl EdibleItem {
    /// Rendered width (sprite grows with tier)
    pub fn display_width(&self) -> f32 {
        2.0 * (ITEM_BASE_SIZE + self.tier as f32 * ITEM_SIZE_PER_TIER)
    }
}

/// A drifting obstacle that penalizes smaller players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    /// Danger level; only hurts players of a lower tier
    pub tier: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Hazard {
    pub fn display_width(&self) -> f32 {
        2.0 * (HAZARD_BASE_SIZE + self.tier as f32 * HAZARD_SIZE_PER_TIER)
    }

    /// Drift and bounce off the world edges
    pub fn drift(&mut self, dt: f32, width: f32, height: f32) {
        let r = self.display_width() / 2.0;
        self.pos += self.vel * dt;

        if self.pos.x < r {
            self.pos.x = r;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > width - r {
            self.pos.x = width - r;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y < r {
            self.pos.y = r;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > height - r {
            self.pos.y = height - r;
            self.vel.y = -self.vel.y.abs();
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Balance configuration (validated before the session starts)
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (ticks while playing)
    pub time_ticks: u64,
    pub progress: PlayerProgress,
    pub score: SessionScore,
    pub player: Player,
    /// Edible items (sorted by id for determinism)
    pub items: Vec<EdibleItem>,
    /// Hazards (sorted by id for determinism)
    pub hazards: Vec<Hazard>,
    /// Final result, set once when the level completes
    pub outcome: Option<LevelOutcome>,
    /// Pending notifications for the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the reference tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session and populate the world from `tuning`
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        state.populate();
        log::info!(
            "Session started (seed {}): {} items, {} hazards",
            seed,
            state.items.len(),
            state.hazards.len()
        );
        state
    }

    /// A session with the player centered and nothing spawned
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.world.width / 2.0, tuning.world.height / 2.0);
        Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            progress: PlayerProgress::new(),
            score: SessionScore::default(),
            player: Player::new(center),
            items: Vec::new(),
            hazards: Vec::new(),
            outcome: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn every tier's items, then hazards for every tier above the first
    fn populate(&mut self) {
        let mut rng = self.rng_state.to_rng();
        for tier in 1..=self.tuning.max_tier() {
            self.spawn_items_for_tier(&mut rng, tier);
        }
        for tier in 2..=self.tuning.max_tier() {
            self.spawn_hazards_for_tier(&mut rng, tier);
        }
    }

    fn spawn_items_for_tier(&mut self, rng: &mut Pcg32, tier: u32) {
        let count = self.tuning.density(tier);
        for _ in 0..count {
            let pos = random_point(rng, &self.tuning, ITEM_SPAWN_MARGIN);
            let item_type = ItemType(rng.random_range(0..ITEM_TYPES));
            self.spawn_item(tier, item_type, pos);
        }
    }

    fn spawn_hazards_for_tier(&mut self, rng: &mut Pcg32, tier: u32) {
        let count = 3 + tier;
        for _ in 0..count {
            let pos = random_point(rng, &self.tuning, HAZARD_SPAWN_MARGIN);
            let vel = Vec2::new(
                rng.random_range(-HAZARD_MAX_DRIFT..=HAZARD_MAX_DRIFT),
                rng.random_range(-HAZARD_MAX_DRIFT..=HAZARD_MAX_DRIFT),
            );
            self.spawn_hazard(tier, pos, vel);
        }
    }

    /// Place an item in the world
    pub fn spawn_item(&mut self, tier: u32, item_type: ItemType, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.items.push(EdibleItem {
            id,
            tier,
            item_type,
            pos,
        });
        id
    }

    /// Place a hazard in the world
    pub fn spawn_hazard(&mut self, tier: u32, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.hazards.push(Hazard { id, tier, pos, vel });
        id
    }

    /// Remove every item of a tier, returning how many were removed
    pub fn despawn_tier(&mut self, tier: u32) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.tier != tier);
        before - self.items.len()
    }

    /// Current player radius
    pub fn player_size(&self) -> f32 {
        self.tuning.player_size(self.progress.current_tier)
    }

    /// Current mouth hitbox center
    pub fn mouth_position(&self) -> Vec2 {
        self.player
            .mouth(self.player_size(), self.tuning.player.mouth_offset)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|i| i.id);
        self.hazards.sort_by_key(|h| h.id);
    }
}

fn random_point(rng: &mut Pcg32, tuning: &Tuning, margin: f32) -> Vec2 {
    let x_hi = (tuning.world.width - margin).max(margin);
    let y_hi = (tuning.world.height - margin).max(margin);
    Vec2::new(
        rng.random_range(margin..=x_hi),
        rng.random_range(margin..=y_hi),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_population() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progress.current_tier, 1);
        assert_eq!(state.score.total_score, 0);

        // 30 + 25 + 20 + 15 + 10 items
        assert_eq!(state.items.len(), 100);
        for tier in 1..=5 {
            let count = state.items.iter().filter(|i| i.tier == tier).count();
            assert_eq!(count as u32, state.tuning.density(tier));
        }
        // 3 + tier hazards for tiers 2..=5
        assert_eq!(state.hazards.len(), 5 + 6 + 7 + 8);
        assert!(state.hazards.iter().all(|h| h.tier >= 2));
    }

    #[test]
    fn test_spawn_bounds() {
        let state = GameState::new(7);
        for item in &state.items {
            assert!(item.pos.x >= 50.0 && item.pos.x <= 1550.0);
            assert!(item.pos.y >= 50.0 && item.pos.y <= 1150.0);
            assert!(item.item_type.0 < ITEM_TYPES);
        }
        for hazard in &state.hazards {
            assert!(hazard.pos.x >= 100.0 && hazard.pos.x <= 1500.0);
            assert!(hazard.vel.x.abs() <= 50.0 && hazard.vel.y.abs() <= 50.0);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::new(99999);
        let b = GameState::new(99999);
        assert_eq!(a.items.len(), b.items.len());
        for (x, y) in a.items.iter().zip(&b.items) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.item_type, y.item_type);
        }
    }

    #[test]
    fn test_despawn_tier() {
        let mut state = GameState::new(1);
        let removed = state.despawn_tier(1);
        assert_eq!(removed, 30);
        assert!(state.items.iter().all(|i| i.tier != 1));
        assert_eq!(state.despawn_tier(1), 0);
    }

    #[test]
    fn test_entity_sizes() {
        let item = EdibleItem {
            id: 1,
            tier: 2,
            item_type: ItemType(0),
            pos: Vec2::ZERO,
        };
        assert!((item.display_width() - 28.0).abs() < 0.001);

        let hazard = Hazard {
            id: 2,
            tier: 3,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
        };
        assert!((hazard.display_width() - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_mouth_follows_facing() {
        let state = GameState::empty(0, Tuning::default());
        // Size 20, offset 0.7, facing up
        let mouth = state.mouth_position();
        assert!((mouth - Vec2::new(800.0, 586.0)).length() < 0.001);
    }

    #[test]
    fn test_hazard_bounces_off_walls() {
        let mut hazard = Hazard {
            id: 1,
            tier: 2,
            pos: Vec2::new(30.0, 600.0),
            vel: Vec2::new(-50.0, 0.0),
        };
        hazard.drift(1.0, 1600.0, 1200.0);
        // Radius 25: clamped to the edge and reflected
        assert!((hazard.pos.x - 25.0).abs() < 0.001);
        assert!(hazard.vel.x > 0.0);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.items.len(), state.items.len());
        assert_eq!(restored.progress, state.progress);
    }
}
