use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::registry::CatalogError;

/// Identifier wrapper for assessment users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// The fixed set of scored business categories.
///
/// Each dimension carries a fixed aggregation weight; the weights deliberately
/// do not sum to 1.0 because the remainder is reserved for the dynamically
/// weighted baseline signal (see the `weights` module).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Operations,
    Sales,
    TechnologyStack,
    CustomerExperience,
    Strategy,
    Marketing,
    AiReadiness,
    DigitalTransformation,
    Leadership,
    CompetitiveBenchmarking,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Operations,
        Dimension::Sales,
        Dimension::TechnologyStack,
        Dimension::CustomerExperience,
        Dimension::Strategy,
        Dimension::Marketing,
        Dimension::AiReadiness,
        Dimension::DigitalTransformation,
        Dimension::Leadership,
        Dimension::CompetitiveBenchmarking,
    ];

    /// Storage/wire key for the dimension, matching the profile row columns.
    pub const fn key(self) -> &'static str {
        match self {
            Dimension::Operations => "operations",
            Dimension::Sales => "sales",
            Dimension::TechnologyStack => "technology_stack",
            Dimension::CustomerExperience => "customer_experience",
            Dimension::Strategy => "strategy",
            Dimension::Marketing => "marketing",
            Dimension::AiReadiness => "ai_readiness",
            Dimension::DigitalTransformation => "digital_transformation",
            Dimension::Leadership => "leadership",
            Dimension::CompetitiveBenchmarking => "competitive_benchmarking",
        }
    }

    /// Parse a storage key. Unknown identifiers are a configuration fault.
    pub fn from_key(key: &str) -> Result<Self, CatalogError> {
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.key() == key)
            .ok_or_else(|| CatalogError::UnknownDimension(key.to_string()))
    }
}

/// A submitted answer value. Single-choice and free-text questions produce
/// text; multi-select questions produce an array of selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Multi(Vec<String>),
}

/// A user's answer set, keyed by semantic question key. Insertion order is
/// irrelevant; keys are unique across the whole assessment.
pub type AnswerRecord = BTreeMap<String, AnswerValue>;

/// Everything the engine reads and writes for one user.
///
/// Dimension scores are absent until every group of that dimension's current
/// bracket is complete; they are replaced, never accumulated, when a completed
/// group's answers change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentProfile {
    pub baseline_score: Option<f64>,
    pub dimension_scores: BTreeMap<Dimension, f64>,
    pub answers: AnswerRecord,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentProfile {
    pub fn new() -> Self {
        Self {
            baseline_score: None,
            dimension_scores: BTreeMap::new(),
            answers: AnswerRecord::new(),
            updated_at: Utc::now(),
        }
    }

    /// Number of deep dimensions with a known score. Drives the dynamic
    /// baseline weight, so it must always be recomputed from the map.
    pub fn completed_deep(&self) -> usize {
        self.dimension_scores.len()
    }

    pub fn score_of(&self, dimension: Dimension) -> Option<f64> {
        self.dimension_scores.get(&dimension).copied()
    }
}

impl Default for AssessmentProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated maturity score plus the weight mass that produced it, kept for
/// transparency and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub value: f64,
    pub total_weight: f64,
}
