//! Aggregation weight table.
//!
//! The per-dimension constants are a score-compatibility contract with stored
//! profiles; changing any of them silently shifts every historical overall
//! score. The one dynamic weight belongs to the baseline signal and is a pure
//! function of how many deep dimensions are currently complete.

use super::domain::Dimension;
use super::registry::CatalogError;

/// Baseline weight while fewer than [`DEEP_COMPLETION_THRESHOLD`] deep
/// dimensions are complete.
pub const BASELINE_WEIGHT_EARLY: f64 = 0.25;

/// Baseline weight once the threshold is reached.
pub const BASELINE_WEIGHT_ESTABLISHED: f64 = 0.15;

/// Completed deep dimensions required before the baseline signal is demoted.
pub const DEEP_COMPLETION_THRESHOLD: usize = 2;

/// Fixed aggregation weight for a deep dimension.
pub const fn dimension_weight(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Operations => 0.15,
        Dimension::Sales => 0.10,
        Dimension::TechnologyStack => 0.10,
        Dimension::CustomerExperience => 0.10,
        Dimension::Strategy => 0.15,
        Dimension::Marketing => 0.05,
        Dimension::AiReadiness => 0.05,
        Dimension::DigitalTransformation => 0.05,
        Dimension::Leadership => 0.03,
        Dimension::CompetitiveBenchmarking => 0.02,
    }
}

/// Weight lookup for string identifiers arriving from storage or HTTP.
pub fn weight_for_key(key: &str) -> Result<f64, CatalogError> {
    Dimension::from_key(key).map(dimension_weight)
}

/// The baseline signal's weight for the given completion count.
///
/// Evaluated on every aggregation call; callers must never cache the result
/// across score changes.
pub fn baseline_weight(completed_deep: usize) -> f64 {
    if completed_deep >= DEEP_COMPLETION_THRESHOLD {
        BASELINE_WEIGHT_ESTABLISHED
    } else {
        BASELINE_WEIGHT_EARLY
    }
}
