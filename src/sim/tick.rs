//! Per-frame simulation tick
//!
//! Order within a tick is fixed: movement, then consumption, then hazard
//! contacts, then the clock and win check. A tier advance during consumption
//! changes which hazards are dangerous later in the same tick.

use glam::Vec2;

use super::collision::{
    dangerous_contacts, find_consumable, hazard_is_dangerous, is_consumable_tier, knockback,
};
use super::outcome::{LevelOutcome, level_won};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::KNOCKBACK_SPEED;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent per axis (sign only; screen space, +y is down)
    pub move_dir: Vec2,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::Ended => {}
        }
    }

    // Don't tick if paused or finished
    match state.phase {
        GamePhase::Paused | GamePhase::Ended => return,
        GamePhase::Playing => {}
    }

    let mut input = input.clone();
    if input.idle_mode {
        input.move_dir = autopilot_direction(state);
    }

    state.time_ticks += 1;

    move_player(state, input.move_dir, dt);
    let (width, height) = (state.tuning.world.width, state.tuning.world.height);
    for hazard in &mut state.hazards {
        hazard.drift(dt, width, height);
    }

    check_consumption(state);
    check_hazards(state);

    state.score.advance_clock(dt);
    check_win(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Set velocity from input (or a pending knockback), integrate, clamp to world
fn move_player(state: &mut GameState, move_dir: Vec2, dt: f32) {
    let speed = state.tuning.player.speed;
    let size = state.player_size();
    let (width, height) = (state.tuning.world.width, state.tuning.world.height);
    let player = &mut state.player;

    let input_vel = Vec2::new(axis(move_dir.x), axis(move_dir.y)) * speed;
    if input_vel != Vec2::ZERO {
        player.facing = input_vel.normalize();
    }

    player.vel = player.knockback.take().unwrap_or(input_vel);
    player.pos += player.vel * dt;
    player.pos.x = player.pos.x.max(size).min(width - size);
    player.pos.y = player.pos.y.max(size).min(height - size);
}

#[inline]
fn axis(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Eat at most one touching item from the eligible tiers
fn check_consumption(state: &mut GameState) {
    let tiers = state.progress.consumable_tiers();
    let Some(index) = find_consumable(
        &state.items,
        state.mouth_position(),
        state.player_size(),
        tiers,
    ) else {
        return;
    };

    let item = state.items.remove(index);
    let outcome = state
        .progress
        .consume(&state.tuning, item.tier, item.item_type);
    state.score.add_points(outcome.points);

    log::debug!(
        "Ate tier {} type {} for {} points (score {})",
        item.tier,
        item.item_type.0,
        outcome.points,
        state.score.total_score
    );
    state.events.push(GameEvent::ItemConsumed {
        tier: item.tier,
        item_type: item.item_type,
        points: outcome.points,
    });

    if let Some(new_tier) = outcome.tier_changed {
        on_tier_advanced(state, new_tier);
    }
}

/// Announce growth and retire items two tiers below the new tier
fn on_tier_advanced(state: &mut GameState, new_tier: u32) {
    let name = state
        .tuning
        .tier(new_tier)
        .map(|t| t.name.as_str())
        .unwrap_or("?");
    log::info!("Advanced to tier {} ({})", new_tier, name);
    state.events.push(GameEvent::TierAdvanced { tier: new_tier });

    if let Some(stale_tier) = new_tier.checked_sub(2).filter(|&t| t >= 1) {
        let count = state.despawn_tier(stale_tier);
        if count > 0 {
            log::info!("Despawned {} tier {} items", count, stale_tier);
            state.events.push(GameEvent::ItemsDespawned {
                tier: stale_tier,
                count,
            });
        }
    }
}

/// Every touching dangerous hazard costs the penalty and pushes the player away
fn check_hazards(state: &mut GameState) {
    let contacts = dangerous_contacts(
        &state.hazards,
        state.player.pos,
        state.player_size(),
        state.progress.current_tier,
    );

    for index in contacts {
        let hazard = &state.hazards[index];
        let penalty = state.progress.take_damage(&state.tuning);
        state.score.apply_penalty(penalty);
        state.player.knockback = Some(knockback(hazard.pos, state.player.pos, KNOCKBACK_SPEED));

        log::debug!(
            "Hit tier {} hazard {} for -{} (score {})",
            hazard.tier,
            hazard.id,
            penalty,
            state.score.total_score
        );
        state.events.push(GameEvent::HazardHit {
            hazard_id: hazard.id,
            penalty,
        });
    }
}

/// End the level once the top tier's quota is met. Runs at most once.
fn check_win(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !level_won(&state.progress, &state.tuning) {
        return;
    }

    let outcome = LevelOutcome::evaluate(&state.score, &state.tuning);
    state.phase = GamePhase::Ended;
    state.outcome = Some(outcome);
    state.events.push(GameEvent::LevelComplete(outcome));
    log::info!(
        "Level complete: score {}, {}s, {} stars",
        outcome.final_score,
        outcome.elapsed_seconds,
        outcome.stars_awarded
    );
}

/// Hazards closer than this (beyond contact range) make the AI flee
const FLEE_MARGIN: f32 = 60.0;

/// Demo AI: flee nearby dangerous hazards, otherwise chase the nearest
/// edible item. Returns an 8-way movement intent.
fn autopilot_direction(state: &GameState) -> Vec2 {
    let tier = state.progress.current_tier;
    let pos = state.player.pos;
    let size = state.player_size();

    let flee: Vec2 = state
        .hazards
        .iter()
        .filter(|h| hazard_is_dangerous(h.tier, tier))
        .filter_map(|h| {
            let away = pos - h.pos;
            let reach = size + h.display_width() / 2.0 + FLEE_MARGIN;
            let dist = away.length();
            (dist < reach).then(|| away.normalize_or_zero() * (reach - dist))
        })
        .sum();

    let desired = if flee != Vec2::ZERO {
        flee
    } else {
        let mouth = state.mouth_position();
        state
            .items
            .iter()
            .filter(|i| is_consumable_tier(i.tier, tier))
            .min_by(|a, b| {
                a.pos
                    .distance_squared(mouth)
                    .partial_cmp(&b.pos.distance_squared(mouth))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|i| i.pos - pos)
            .unwrap_or(Vec2::ZERO)
    };

    quantize_direction(desired)
}

/// Snap a direction to the nearest of 8 compass intents
fn quantize_direction(dir: Vec2) -> Vec2 {
    let unit = dir.normalize_or_zero();
    // sin(22.5°): components below this snap to zero
    const SNAP: f32 = 0.382_683_43;
    let snap = |c: f32| if c.abs() < SNAP { 0.0 } else { c.signum() };
    Vec2::new(snap(unit.x), snap(unit.y))
}
