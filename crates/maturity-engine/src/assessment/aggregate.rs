//! Overall score aggregation.
//!
//! The overall maturity score is the weighted mean of every currently known
//! score, renormalized by the weight mass actually present. Partial profiles
//! therefore still land in [1.0, 5.0], and a baseline-only profile reduces
//! exactly to the baseline value.

use super::domain::{AssessmentProfile, OverallScore};
use super::weights::{baseline_weight, dimension_weight};

/// Aggregation was attempted with no known scores. Surfaced to users as
/// "assessment not started".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no assessment scores are available yet")]
pub struct InsufficientDataError;

/// Combine the baseline signal and every known dimension score into one
/// overall score.
///
/// The baseline weight is re-derived from the completion count on every call.
/// No intermediate rounding happens here; display rounding belongs to
/// callers.
pub fn compute_overall(profile: &AssessmentProfile) -> Result<OverallScore, InsufficientDataError> {
    let baseline_slot = baseline_weight(profile.completed_deep());

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    if let Some(baseline) = profile.baseline_score {
        weighted_sum += baseline * baseline_slot;
        total_weight += baseline_slot;
    }

    for (dimension, score) in &profile.dimension_scores {
        let weight = dimension_weight(*dimension);
        weighted_sum += score * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return Err(InsufficientDataError);
    }

    Ok(OverallScore {
        value: weighted_sum / total_weight,
        total_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Dimension;

    fn profile() -> AssessmentProfile {
        AssessmentProfile::new()
    }

    #[test]
    fn empty_profile_is_insufficient_data() {
        assert_eq!(compute_overall(&profile()), Err(InsufficientDataError));
    }

    #[test]
    fn baseline_only_reduces_exactly_to_the_baseline() {
        let mut profile = profile();
        profile.baseline_score = Some(3.0);
        let overall = compute_overall(&profile).unwrap();
        assert_eq!(overall.value, 3.0);
        assert_eq!(overall.total_weight, 0.25);
    }

    #[test]
    fn two_completed_dimensions_demote_the_baseline() {
        let mut profile = profile();
        profile.baseline_score = Some(4.0);
        profile.dimension_scores.insert(Dimension::Operations, 2.0);
        profile.dimension_scores.insert(Dimension::Sales, 3.0);

        let overall = compute_overall(&profile).unwrap();
        // 4.0*0.15 + 2.0*0.15 + 3.0*0.10 = 1.2 over weight 0.40
        assert!((overall.value - 3.0).abs() < 1e-12);
        assert!((overall.total_weight - 0.40).abs() < 1e-12);
    }

    #[test]
    fn one_completed_dimension_keeps_the_early_baseline_weight() {
        let mut profile = profile();
        profile.baseline_score = Some(4.0);
        profile.dimension_scores.insert(Dimension::Operations, 2.0);

        let overall = compute_overall(&profile).unwrap();
        // 4.0*0.25 + 2.0*0.15 = 1.3 over weight 0.40
        assert!((overall.value - 3.25).abs() < 1e-12);
        assert!((overall.total_weight - 0.40).abs() < 1e-12);
    }

    #[test]
    fn dimensions_without_baseline_still_aggregate() {
        let mut profile = profile();
        profile.dimension_scores.insert(Dimension::Strategy, 4.0);
        profile
            .dimension_scores
            .insert(Dimension::Leadership, 2.0);

        let overall = compute_overall(&profile).unwrap();
        let expected = (4.0 * 0.15 + 2.0 * 0.03) / 0.18;
        assert!((overall.value - expected).abs() < 1e-12);
    }

    #[test]
    fn overall_stays_on_the_scale_for_dense_profiles() {
        let mut profile = profile();
        profile.baseline_score = Some(5.0);
        for dimension in Dimension::ALL {
            profile.dimension_scores.insert(dimension, 5.0);
        }
        let overall = compute_overall(&profile).unwrap();
        assert!((1.0..=5.0).contains(&overall.value));
        assert!((overall.value - 5.0).abs() < 1e-12);
        assert!((overall.total_weight - 0.95).abs() < 1e-12);
    }

    #[test]
    fn aggregation_is_pure_and_repeatable() {
        let mut profile = profile();
        profile.baseline_score = Some(3.5);
        profile.dimension_scores.insert(Dimension::Marketing, 2.5);
        profile
            .dimension_scores
            .insert(Dimension::AiReadiness, 4.5);

        let first = compute_overall(&profile).unwrap();
        let second = compute_overall(&profile).unwrap();
        assert_eq!(first, second);
    }
}
