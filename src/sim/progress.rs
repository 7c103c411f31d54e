//! Player progression: tier, quota counters, and per-type consumption history

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scoring::item_points;
use crate::tuning::Tuning;

/// Item sub-category used to bucket score decay
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemType(pub u8);

/// Result of eating one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeOutcome {
    /// Points awarded (caller adds them to the running score)
    pub points: u32,
    /// New tier, if this consumption completed the tier's quota
    pub tier_changed: Option<u32>,
}

/// Progress of the player through the size tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Current tier in `[1, N]`
    pub current_tier: u32,
    /// Items eaten since the last tier advancement
    pub consumed_in_tier: u32,
    /// Items eaten this session
    pub total_consumed: u32,
    /// Times each item type has been eaten this session
    pub consumed_type_counts: BTreeMap<ItemType, u32>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self {
            current_tier: 1,
            consumed_in_tier: 0,
            total_consumed: 0,
            consumed_type_counts: BTreeMap::new(),
        }
    }

    /// Eat an item: score it, bump the counters, and advance the tier if the
    /// quota is met and a higher tier exists.
    pub fn consume(
        &mut self,
        tuning: &Tuning,
        item_tier: u32,
        item_type: ItemType,
    ) -> ConsumeOutcome {
        let count = self.consumed_type_counts.entry(item_type).or_insert(0);
        *count += 1;
        let consume_count = *count;

        let points = item_points(tuning, item_tier, consume_count);

        self.consumed_in_tier += 1;
        self.total_consumed += 1;

        let tier_changed = if self.consumed_in_tier >= tuning.quota(self.current_tier)
            && self.current_tier < tuning.max_tier()
        {
            Some(self.advance_tier())
        } else {
            None
        };

        ConsumeOutcome {
            points,
            tier_changed,
        }
    }

    fn advance_tier(&mut self) -> u32 {
        self.current_tier += 1;
        self.consumed_in_tier = 0;
        self.current_tier
    }

    /// Penalty for touching a dangerous hazard (caller subtracts it, no floor)
    pub fn take_damage(&self, tuning: &Tuning) -> u32 {
        tuning.scoring.hazard_penalty
    }

    /// Fraction of the current tier's quota eaten so far (display only)
    pub fn progress(&self, tuning: &Tuning) -> f32 {
        self.consumed_in_tier as f32 / tuning.quota(self.current_tier) as f32
    }

    /// Tiers that may currently be eaten, in scan order: current tier first,
    /// then the one below (the same tier twice at tier 1).
    pub fn consumable_tiers(&self) -> [u32; 2] {
        [self.current_tier, self.current_tier.saturating_sub(1).max(1)]
    }

    /// Times an item type has been eaten
    pub fn type_count(&self, item_type: ItemType) -> u32 {
        self.consumed_type_counts
            .get(&item_type)
            .copied()
            .unwrap_or(0)
    }

    /// At the top tier with its quota met
    pub fn is_complete(&self, tuning: &Tuning) -> bool {
        self.current_tier == tuning.max_tier()
            && self.consumed_in_tier >= tuning.quota(self.current_tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        let progress = PlayerProgress::new();
        assert_eq!(progress.current_tier, 1);
        assert_eq!(progress.consumed_in_tier, 0);
        assert_eq!(progress.total_consumed, 0);
        assert!(progress.consumed_type_counts.is_empty());
        assert_eq!(progress.consumable_tiers(), [1, 1]);
    }

    #[test]
    fn test_ten_distinct_types_advance_once() {
        let tuning = Tuning::default();
        let mut progress = PlayerProgress::new();
        let mut total = 0;
        let mut advances = Vec::new();

        for t in 0..10 {
            let outcome = progress.consume(&tuning, 1, ItemType(t));
            total += outcome.points;
            advances.extend(outcome.tier_changed);
        }

        assert_eq!(total, 800);
        assert_eq!(advances, vec![2]);
        assert_eq!(progress.current_tier, 2);
        assert_eq!(progress.consumed_in_tier, 0);
        assert_eq!(progress.total_consumed, 10);
        assert_eq!(progress.consumable_tiers(), [2, 1]);
    }

    #[test]
    fn test_advance_fires_exactly_at_quota() {
        let tuning = Tuning::default();
        let mut progress = PlayerProgress::new();
        for _ in 0..9 {
            let outcome = progress.consume(&tuning, 1, ItemType(0));
            assert_eq!(outcome.tier_changed, None);
        }
        assert_eq!(progress.consumed_in_tier, 9);
        let outcome = progress.consume(&tuning, 1, ItemType(0));
        assert_eq!(outcome.tier_changed, Some(2));
    }

    #[test]
    fn test_type_counts_span_tiers() {
        let tuning = Tuning::default();
        let mut progress = PlayerProgress::new();
        progress.consume(&tuning, 1, ItemType(4));
        let outcome = progress.consume(&tuning, 2, ItemType(4));
        assert_eq!(progress.type_count(ItemType(4)), 2);
        assert_eq!(progress.type_count(ItemType(7)), 0);
        assert!(outcome.points < 80);
    }

    #[test]
    fn test_max_tier_is_terminal() {
        let tuning = Tuning::default();
        let mut progress = PlayerProgress::new();
        for _ in 0..(10 + 15 + 20 + 25) {
            progress.consume(&tuning, 1, ItemType(0));
        }
        assert_eq!(progress.current_tier, 5);
        assert_eq!(progress.consumed_in_tier, 0);

        for _ in 0..40 {
            let outcome = progress.consume(&tuning, 5, ItemType(1));
            assert_eq!(outcome.tier_changed, None);
            assert!(outcome.points >= 1);
        }
        assert_eq!(progress.current_tier, 5);
        assert_eq!(progress.consumed_in_tier, 40);
        assert!(progress.is_complete(&tuning));
    }

    #[test]
    fn test_take_damage_is_fixed_penalty() {
        let tuning = Tuning::default();
        let progress = PlayerProgress::new();
        assert_eq!(progress.take_damage(&tuning), 80);
    }

    #[test]
    fn test_complete_needs_every_item_of_huge_quota() {
        let mut tuning = Tuning::default();
        tuning.tiers.truncate(1);
        tuning.tiers[0].quota = 16_777_217;
        let mut progress = PlayerProgress::new();

        // One short; the ratio rounds to 1.0 in f32
        progress.consumed_in_tier = 16_777_216;
        assert!(!progress.is_complete(&tuning));

        progress.consume(&tuning, 1, ItemType(0));
        assert!(progress.is_complete(&tuning));
    }

    #[test]
    fn test_progress_ratio() {
        let tuning = Tuning::default();
        let mut progress = PlayerProgress::new();
        for t in 0..5 {
            progress.consume(&tuning, 1, ItemType(t));
        }
        assert!((progress.progress(&tuning) - 0.5).abs() < 0.001);
        assert!(!progress.is_complete(&tuning));
    }

    proptest! {
        #[test]
        fn tier_never_decreases_or_exceeds_max(
            items in prop::collection::vec((1u32..=5, 0u8..10), 0..200)
        ) {
            let tuning = Tuning::default();
            let mut progress = PlayerProgress::new();
            let mut last_tier = progress.current_tier;
            let mut last_total = 0;

            for (tier, kind) in items {
                let outcome = progress.consume(&tuning, tier, ItemType(kind));
                prop_assert!(progress.current_tier >= last_tier);
                prop_assert!(progress.current_tier <= tuning.max_tier());
                prop_assert_eq!(progress.total_consumed, last_total + 1);
                if let Some(new_tier) = outcome.tier_changed {
                    prop_assert_eq!(new_tier, last_tier + 1);
                    prop_assert_eq!(progress.consumed_in_tier, 0);
                }
                if progress.current_tier < tuning.max_tier() {
                    prop_assert!(progress.consumed_in_tier < tuning.quota(progress.current_tier));
                }
                last_tier = progress.current_tier;
                last_total = progress.total_consumed;
            }
        }
    }
}
