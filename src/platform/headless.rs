//! Headless play: runs a session with the demo AI and no presentation layer

use crate::consts::SIM_DT;
use crate::sim::{GameEvent, GamePhase, GameState, LevelOutcome, TickInput, tick};

/// Result of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    /// Set when the level was completed
    pub outcome: Option<LevelOutcome>,
    pub ticks: u64,
    pub tiers_advanced: u32,
    pub hazard_hits: u32,
    pub final_score: i64,
    pub final_tier: u32,
}

/// Let the autopilot play until the level completes or `max_ticks` elapse
pub fn run_autopilot(state: &mut GameState, max_ticks: u64) -> HeadlessReport {
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut tiers_advanced = 0;
    let mut hazard_hits = 0;

    let mut ticks = 0;
    while ticks < max_ticks && state.phase == GamePhase::Playing {
        tick(state, &input, SIM_DT);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::TierAdvanced { .. } => tiers_advanced += 1,
                GameEvent::HazardHit { .. } => hazard_hits += 1,
                _ => {}
            }
        }
    }

    if state.outcome.is_none() {
        log::info!(
            "Autopilot stopped after {} ticks at tier {} (score {})",
            ticks,
            state.progress.current_tier,
            state.score.total_score
        );
    }

    HeadlessReport {
        outcome: state.outcome,
        ticks,
        tiers_advanced,
        hazard_hits,
        final_score: state.score.total_score,
        final_tier: state.progress.current_tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ItemType;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_autopilot_completes_small_level() {
        let mut tuning = Tuning::default();
        tuning.tiers.truncate(2);
        tuning.tiers[0].quota = 3;
        tuning.tiers[1].quota = 2;
        let mut state = GameState::empty(5, tuning);

        let center = state.player.pos;
        for (i, offset) in [-150.0, 150.0, 0.0].into_iter().enumerate() {
            state.spawn_item(1, ItemType(i as u8), center + Vec2::new(offset, 120.0));
        }
        state.spawn_item(2, ItemType(5), center + Vec2::new(-200.0, -100.0));
        state.spawn_item(2, ItemType(6), center + Vec2::new(200.0, -100.0));

        let report = run_autopilot(&mut state, 60 * 60);
        let outcome = report.outcome.expect("level should complete");
        assert_eq!(outcome.final_score, 5 * 80);
        assert_eq!(report.tiers_advanced, 1);
        assert_eq!(report.hazard_hits, 0);
        assert_eq!(report.final_tier, 2);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_autopilot_respects_tick_budget() {
        let mut state = GameState::new(42);
        let report = run_autopilot(&mut state, 120);
        assert!(report.ticks <= 120);
        assert_eq!(report.ticks, state.time_ticks);
    }
}
