//! Score aggregation over the five rubric criteria.
//!
//! Deterministic and side-effect free. The summary is derived from the
//! score set every time it is needed and never stored next to the result,
//! so the displayed percentage can never go stale relative to the scores.

use serde::Serialize;

use crate::types::ScoreSet;

/// Maximum attainable total: 5 criteria x 10 points.
pub const MAX_SCORE: u32 = 50;

/// Derived scoring summary for one analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub total: u32,
    pub max: u32,
    /// Integer percentage, rounded to the nearest whole number.
    pub percentage: u32,
    /// True iff total / max >= 0.5.
    pub recommended: bool,
}

/// Compute total, percentage, and the recommendation flag from a score set.
pub fn summarize(scores: &ScoreSet) -> ScoreSummary {
    let total: u32 = scores.entries().iter().map(|(_, f)| u32::from(f.score)).sum();
    let percentage = ((total as f64 / MAX_SCORE as f64) * 100.0).round() as u32;
    ScoreSummary {
        total,
        max: MAX_SCORE,
        percentage,
        recommended: total as f64 / MAX_SCORE as f64 >= 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CriterionFeedback, ScoreSet};

    fn mk_scores(values: [u8; 5]) -> ScoreSet {
        let fb = |score| CriterionFeedback {
            score,
            reason: "เหตุผลทดสอบ".to_string(),
        };
        ScoreSet {
            problem_clarity_in_context: fb(values[0]),
            measurable_objectives: fb(values[1]),
            scope_and_timeline_feasibility: fb(values[2]),
            methodology_in_practice: fb(values[3]),
            synergy_and_value_for_company: fb(values[4]),
        }
    }

    #[test]
    fn test_perfect_scores() {
        let s = summarize(&mk_scores([10, 10, 10, 10, 10]));
        assert_eq!(s.total, 50);
        assert_eq!(s.max, 50);
        assert_eq!(s.percentage, 100);
        assert!(s.recommended);
    }

    #[test]
    fn test_floor_scores() {
        let s = summarize(&mk_scores([1, 1, 1, 1, 1]));
        assert_eq!(s.total, 5);
        assert_eq!(s.percentage, 10);
        assert!(!s.recommended);
    }

    #[test]
    fn test_recommendation_boundary() {
        // 25/50 is exactly the 50% threshold and counts as recommended.
        let at = summarize(&mk_scores([5, 5, 5, 5, 5]));
        assert_eq!(at.total, 25);
        assert_eq!(at.percentage, 50);
        assert!(at.recommended);

        let below = summarize(&mk_scores([5, 5, 5, 5, 4]));
        assert_eq!(below.total, 24);
        assert_eq!(below.percentage, 48);
        assert!(!below.recommended);
    }

    #[test]
    fn test_total_stays_within_rubric_bounds() {
        for values in [[1, 2, 3, 4, 5], [9, 8, 7, 6, 10], [1, 10, 1, 10, 1]] {
            let s = summarize(&mk_scores(values));
            assert!((5..=50).contains(&s.total));
        }
    }
}
