//! Built-in standard question-group catalog.
//!
//! Question keys are bracket-qualified (`<stem>_<bracket label>`) so that a
//! user's answer set stays unique across the whole assessment, following the
//! semantic-to-bracket key-map convention of the stored catalogs. Wording and
//! option sets live with the rendering collaborator; the engine only needs
//! the required keys and their shapes.

use super::bracket::Bracket;
use super::domain::Dimension;
use super::registry::{AnswerShape, FieldSpec, GroupRegistry, GroupSpec};

use AnswerShape::{MultiSelect, Text};

type GroupFields = &'static [(&'static str, AnswerShape)];

struct DimensionCatalog {
    dimension: Dimension,
    groups: [GroupFields; 3],
}

const STANDARD: &[DimensionCatalog] = &[
    DimensionCatalog {
        dimension: Dimension::Operations,
        groups: [
            &[
                ("process_documentation", Text),
                ("workflow_tools", MultiSelect),
                ("bottleneck_areas", MultiSelect),
            ],
            &[
                ("process_review_cadence", Text),
                ("automation_coverage", Text),
            ],
            &[
                ("ops_metrics_tracked", MultiSelect),
                ("continuous_improvement", Text),
            ],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::Sales,
        groups: [
            &[("sales_process_stages", Text), ("crm_usage", Text)],
            &[("pipeline_metrics", MultiSelect), ("forecast_method", Text)],
            &[
                ("win_loss_review", Text),
                ("sales_enablement_tools", MultiSelect),
            ],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::TechnologyStack,
        groups: [
            &[("core_platforms", MultiSelect), ("integration_level", Text)],
            &[("data_infrastructure", Text), ("stack_gaps", MultiSelect)],
            &[
                ("tech_budget_posture", Text),
                ("adoption_blockers", MultiSelect),
            ],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::CustomerExperience,
        groups: [
            &[("feedback_channels", MultiSelect), ("nps_tracking", Text)],
            &[("journey_mapping", Text), ("support_tooling", MultiSelect)],
            &[("retention_programs", Text), ("cx_owner", Text)],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::Strategy,
        groups: [
            &[
                ("strategic_horizon", Text),
                ("growth_priorities", MultiSelect),
            ],
            &[
                ("market_positioning", Text),
                ("differentiation_sources", MultiSelect),
            ],
            &[("strategy_review_cycle", Text), ("okr_discipline", Text)],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::Marketing,
        groups: [
            &[
                ("acquisition_channels", MultiSelect),
                ("brand_clarity", Text),
            ],
            &[("campaign_measurement", Text), ("content_engine", Text)],
            &[("marketing_automation", Text), ("attribution_model", Text)],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::AiReadiness,
        groups: [
            &[("ai_use_cases", MultiSelect), ("data_readiness", Text)],
            &[("ai_skills_coverage", Text), ("governance_posture", Text)],
            &[("ai_tooling", MultiSelect), ("experimentation_cadence", Text)],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::DigitalTransformation,
        groups: [
            &[
                ("digitized_processes", MultiSelect),
                ("legacy_constraints", Text),
            ],
            &[("transformation_roadmap", Text), ("change_management", Text)],
            &[("digital_kpis", MultiSelect), ("executive_sponsorship", Text)],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::Leadership,
        groups: [
            &[("decision_rights", Text), ("leadership_cadence", Text)],
            &[("talent_development", Text), ("succession_depth", Text)],
            &[("culture_signals", MultiSelect), ("alignment_rituals", Text)],
        ],
    },
    DimensionCatalog {
        dimension: Dimension::CompetitiveBenchmarking,
        groups: [
            &[
                ("tracked_competitors", MultiSelect),
                ("benchmark_sources", MultiSelect),
            ],
            &[("pricing_position", Text), ("market_share_view", Text)],
            &[
                ("competitive_response", Text),
                ("differentiation_evidence", Text),
            ],
        ],
    },
];

pub(crate) fn standard_registry() -> GroupRegistry {
    let mut registry = GroupRegistry::new();
    for entry in STANDARD {
        for bracket in Bracket::ALL {
            let groups = entry
                .groups
                .iter()
                .enumerate()
                .map(|(index, fields)| GroupSpec {
                    id: format!("{}_g{}_{}", entry.dimension.key(), index + 1, bracket.label()),
                    required: fields
                        .iter()
                        .map(|(stem, shape)| FieldSpec {
                            key: format!("{stem}_{}", bracket.label()),
                            shape: *shape,
                        })
                        .collect(),
                })
                .collect();
            registry.insert(entry.dimension, bracket, groups);
        }
    }
    registry
}
