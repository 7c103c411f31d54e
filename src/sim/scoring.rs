//! Point awards and star ratings
//!
//! Repeatedly eating the same item type pays less each time. The decay is
//! normalized by the tier's item density, so tiers with many items decay more
//! gently than sparse ones.

use crate::consts::SCORE_DECAY_BASE;
use crate::tuning::{StarThresholds, Tuning};

/// Points for eating an item of `item_tier`, where `consume_count` is how many
/// times this item type has been eaten *including* this one (1 = first time).
///
/// Always in `[min_points, max_points]`, non-increasing in `consume_count`.
pub fn item_points(tuning: &Tuning, item_tier: u32, consume_count: u32) -> u32 {
    let density = tuning.density(item_tier).max(1);
    let exponent = consume_count.saturating_sub(1) as f64 / density as f64;
    let decay = SCORE_DECAY_BASE.powf(exponent);

    let max = tuning.scoring.max_points;
    let min = tuning.scoring.min_points.min(max);
    let raw = (max as f64 * decay).floor() as u32;
    raw.clamp(min, max)
}

/// Stars earned for a final score (thresholds are inclusive lower bounds)
pub fn star_rating(score: i64, stars: &StarThresholds) -> u8 {
    if score >= stars.three {
        3
    } else if score >= stars.two {
        2
    } else if score >= stars.one {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Tier 6 has no density entry, so it uses the default of 10
    const UNCONFIGURED_TIER: u32 = 6;

    #[test]
    fn test_first_consumption_is_max() {
        let tuning = Tuning::default();
        for tier in 1..=6 {
            assert_eq!(item_points(&tuning, tier, 1), 80);
        }
    }

    #[test]
    fn test_repeat_type_decays() {
        let tuning = Tuning::default();
        let points: Vec<u32> = (1..=11)
            .map(|n| item_points(&tuning, UNCONFIGURED_TIER, n))
            .collect();

        assert_eq!(points[0], 80);
        for n in 1..points.len() {
            assert!(points[n] < 80, "repeat #{} should be below max", n + 1);
            assert!(points[n] <= points[n - 1]);
            assert!(points[n] >= 1);
        }
        // 0.9^(1/10) * 80 = 79.16..
        assert_eq!(points[1], 79);
        // A full density of repeats costs exactly one decay step: 80 * 0.9
        assert_eq!(points[10], 72);
        assert!(points[10] < points[1]);
    }

    #[test]
    fn test_dense_tier_decays_slower() {
        let tuning = Tuning::default();
        // Tier 1 density 30, tier 5 density 10
        assert!(item_points(&tuning, 1, 20) > item_points(&tuning, 5, 20));
    }

    #[test]
    fn test_plateaus_at_min_points() {
        let tuning = Tuning::default();
        assert_eq!(item_points(&tuning, UNCONFIGURED_TIER, 10_000), 1);
        assert_eq!(item_points(&tuning, UNCONFIGURED_TIER, u32::MAX), 1);
    }

    #[test]
    fn test_zero_count_treated_as_first() {
        let tuning = Tuning::default();
        assert_eq!(item_points(&tuning, 1, 0), 80);
    }

    #[test]
    fn test_star_boundaries() {
        let stars = StarThresholds::default();
        assert_eq!(star_rating(3000, &stars), 3);
        assert_eq!(star_rating(2999, &stars), 2);
        assert_eq!(star_rating(1500, &stars), 2);
        assert_eq!(star_rating(1499, &stars), 1);
        assert_eq!(star_rating(500, &stars), 1);
        assert_eq!(star_rating(499, &stars), 0);
        assert_eq!(star_rating(-240, &stars), 0);
    }

    proptest! {
        #[test]
        fn points_bounded_and_monotone(tier in 1u32..8, count in 1u32..5_000) {
            let tuning = Tuning::default();
            let now = item_points(&tuning, tier, count);
            let next = item_points(&tuning, tier, count + 1);
            prop_assert!((1..=80).contains(&now));
            prop_assert!(next <= now);
        }

        #[test]
        fn stars_monotone_in_score(score in -10_000i64..10_000) {
            let stars = StarThresholds::default();
            prop_assert!(star_rating(score + 1, &stars) >= star_rating(score, &stars));
        }
    }
}
