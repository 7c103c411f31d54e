//! HUD and camera values derived from the game state
//!
//! The presentation layer reads one [`HudSnapshot`] per frame; nothing here
//! mutates the simulation.

use serde::Serialize;

use crate::sim::GameState;

/// Camera zoom per tier (index 0 = tier 1)
const TIER_ZOOM: [f32; 5] = [1.0, 0.9, 0.8, 0.7, 0.6];
/// Zoom for tiers past the table
const FALLBACK_ZOOM: f32 = 0.5;

/// Everything the HUD shows this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub tier: u32,
    /// "Size: Micro (Tier 1)"
    pub size_label: String,
    /// Fill of the progress bar, 0..=1
    pub progress: f32,
    /// Display color of the current tier (0xRRGGBB)
    pub tier_color: u32,
    pub score: i64,
    /// "Score: 240"
    pub score_label: String,
    pub elapsed_seconds: u32,
    /// "Time: 1:05"
    pub timer_label: String,
    pub zoom: f32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let tier = state.progress.current_tier;
        let def = state.tuning.tier(tier);
        let name = def.map(|t| t.name.as_str()).unwrap_or("?");
        let elapsed = state.score.elapsed_whole_secs();

        Self {
            tier,
            size_label: format!("Size: {} (Tier {})", name, tier),
            progress: state.progress.progress(&state.tuning).clamp(0.0, 1.0),
            tier_color: def.map(|t| t.color).unwrap_or(0xFFFFFF),
            score: state.score.total_score,
            score_label: format!("Score: {}", state.score.total_score),
            elapsed_seconds: elapsed,
            timer_label: format!("Time: {}", format_clock(elapsed)),
            zoom: zoom_for_tier(tier),
        }
    }
}

/// Format whole seconds as `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Camera zoom for a tier
pub fn zoom_for_tier(tier: u32) -> f32 {
    tier.checked_sub(1)
        .and_then(|i| TIER_ZOOM.get(i as usize))
        .copied()
        .unwrap_or(FALLBACK_ZOOM)
}
