//! Pure score-aggregation functions over a [`ScoreMap`] and the registry.
//!
//! All three functions are deterministic, side-effect free, and independent
//! of the order in which keys were inserted into the map.

use crate::criteria;
use crate::scoring::result::ScoreMap;

/// Sum of all awarded points in `scores`.
pub fn total_score(scores: &ScoreMap) -> f64 {
    scores.values().sum()
}

/// Maximum achievable score — the sum of all registry weights.
pub fn max_score() -> f64 {
    f64::from(criteria::total_weight())
}

/// Awarded points as a whole-number percentage of [`max_score`].
///
/// `max_score()` is positive by construction (the registry is a non-empty
/// const table with positive weights), so the division is always defined.
pub fn score_percentage(scores: &ScoreMap) -> u32 {
    ((total_score(scores) / max_score()) * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::EVALUATION_PARAMETERS;

    fn full_marks() -> ScoreMap {
        EVALUATION_PARAMETERS
            .iter()
            .map(|p| (p.key.to_string(), f64::from(p.weight)))
            .collect()
    }

    #[test]
    fn max_score_matches_registry_weights() {
        assert_eq!(max_score(), 108.0);
    }

    #[test]
    fn empty_map_totals_zero() {
        let scores = ScoreMap::new();
        assert_eq!(total_score(&scores), 0.0);
        assert_eq!(score_percentage(&scores), 0);
    }

    #[test]
    fn full_marks_is_one_hundred_percent() {
        let scores = full_marks();
        assert_eq!(total_score(&scores), 108.0);
        assert_eq!(score_percentage(&scores), 100);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let mut scores = ScoreMap::new();
        // 54 / 108 = 50% exactly.
        scores.insert("a".into(), 54.0);
        assert_eq!(score_percentage(&scores), 50);

        // 55 / 108 = 50.92…% → 51.
        scores.insert("a".into(), 55.0);
        assert_eq!(score_percentage(&scores), 51);
    }

    #[test]
    fn total_is_stable_under_insertion_order() {
        let mut forward = ScoreMap::new();
        forward.insert("greeting".into(), 3.0);
        forward.insert("empathy".into(), 5.0);

        let mut reverse = ScoreMap::new();
        reverse.insert("empathy".into(), 5.0);
        reverse.insert("greeting".into(), 3.0);

        assert_eq!(total_score(&forward), total_score(&reverse));
        assert_eq!(score_percentage(&forward), score_percentage(&reverse));
    }

    #[test]
    fn percentage_is_monotonic_in_total() {
        let mut prev = 0;
        for points in 0..=108 {
            let mut scores = ScoreMap::new();
            scores.insert("x".into(), f64::from(points));
            let pct = score_percentage(&scores);
            assert!(pct >= prev, "percentage decreased at {points} points");
            prev = pct;
        }
        assert_eq!(prev, 100);
    }
}
