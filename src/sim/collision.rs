//! Contact tests and the rules for what the player may eat or must avoid
//!
//! Every contact is a circle-vs-circle distance check: two reference points
//! overlap when their distance is below the sum of the effective radii.

use glam::Vec2;

use super::state::{EdibleItem, Hazard};

/// Whether two reference points are closer than `threshold`
#[inline]
pub fn overlaps(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Mouth-to-item contact radius: half the player's size plus half the item width
#[inline]
pub fn consume_threshold(player_size: f32, item: &EdibleItem) -> f32 {
    player_size * 0.5 + item.display_width() / 2.0
}

/// Body-to-hazard contact radius: the full player size plus half the hazard width
#[inline]
pub fn hazard_threshold(player_size: f32, hazard: &Hazard) -> f32 {
    player_size + hazard.display_width() / 2.0
}

/// Items of the current tier and the one below may be eaten
#[inline]
pub fn is_consumable_tier(item_tier: u32, current_tier: u32) -> bool {
    item_tier == current_tier || item_tier == current_tier.saturating_sub(1).max(1)
}

/// Only strictly larger hazards hurt
#[inline]
pub fn hazard_is_dangerous(hazard_tier: u32, current_tier: u32) -> bool {
    hazard_tier > current_tier
}

/// Find the single item the mouth is touching this tick.
///
/// Tiers are scanned in the given order and items in slice order; the first
/// overlap wins. Returns the item's index in `items`.
pub fn find_consumable(
    items: &[EdibleItem],
    mouth: Vec2,
    player_size: f32,
    tiers: [u32; 2],
) -> Option<usize> {
    let [first, second] = tiers;
    let scan = if first == second { &tiers[..1] } else { &tiers[..] };

    scan.iter().find_map(|&tier| {
        items.iter().position(|item| {
            item.tier == tier && overlaps(mouth, item.pos, consume_threshold(player_size, item))
        })
    })
}

/// Indices of every dangerous hazard overlapping the player's body
pub fn dangerous_contacts(
    hazards: &[Hazard],
    player_pos: Vec2,
    player_size: f32,
    current_tier: u32,
) -> Vec<usize> {
    hazards
        .iter()
        .enumerate()
        .filter(|(_, h)| hazard_is_dangerous(h.tier, current_tier))
        .filter(|(_, h)| overlaps(player_pos, h.pos, hazard_threshold(player_size, h)))
        .map(|(i, _)| i)
        .collect()
}

/// Velocity pushing the player directly away from a hazard
pub fn knockback(hazard_pos: Vec2, player_pos: Vec2, speed: f32) -> Vec2 {
    (player_pos - hazard_pos).normalize_or(Vec2::X) * speed
}
