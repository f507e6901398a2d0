use crate::infra::InMemoryProfileRepository;
use clap::Args;
use maturity_engine::assessment::{
    AnswerRecord, AnswerShape, AnswerValue, AssessmentService, Dimension, GroupRegistry,
    NextGroup, ServiceError, SubmissionOutcome, UserId,
};
use maturity_engine::config::EngineConfig;
use maturity_engine::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// User identifier for the synthetic walkthrough
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Optional quick-assessment baseline score (1.0 to 5.0)
    #[arg(long)]
    pub(crate) baseline: Option<f64>,
    /// How many dimensions to walk through
    #[arg(long, default_value_t = 3)]
    pub(crate) dimensions: usize,
    /// How many brackets to complete per dimension
    #[arg(long, default_value_t = 2)]
    pub(crate) brackets: usize,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user,
        baseline,
        dimensions,
        brackets,
    } = args;

    let repository = Arc::new(InMemoryProfileRepository::default());
    let registry = Arc::new(GroupRegistry::standard());
    let service = AssessmentService::new(
        repository,
        registry.clone(),
        EngineConfig::default(),
    )
    .map_err(ServiceError::from)?;

    let user = UserId(user);
    println!("Maturity assessment demo for '{}'", user.0);

    if let Some(score) = baseline {
        let overall = service.record_baseline(&user, score)?;
        println!(
            "Baseline {:.2} recorded -> overall {:.3} (weight {:.2})",
            score, overall.value, overall.total_weight
        );
    }

    for dimension in Dimension::ALL.into_iter().take(dimensions) {
        println!("\nDimension: {}", dimension.key());
        let mut completed = 0;
        while completed < brackets {
            let (bracket, group_index) = match service.next_group(&user, dimension)? {
                NextGroup::Serve {
                    bracket,
                    group_index,
                } => (bracket, group_index),
                NextGroup::DimensionComplete => {
                    println!("  Dimension complete: every bracket is answered");
                    break;
                }
            };

            let answers = canned_answers(&registry, dimension, bracket, group_index)
                .map_err(ServiceError::from)?;
            let report = service.submit_answers(&user, dimension, bracket, group_index, &answers)?;

            match report.outcome {
                SubmissionOutcome::Incomplete { missing } => {
                    println!("  Group held open, missing keys: {missing:?}");
                    break;
                }
                SubmissionOutcome::GroupAdvanced { next } => {
                    println!(
                        "  Completed {} group {} -> next group {}",
                        bracket.label(),
                        group_index,
                        next.group_index
                    );
                }
                SubmissionOutcome::BracketCompleted {
                    dimension_score,
                    next,
                } => {
                    completed += 1;
                    let overall = report
                        .overall
                        .map(|score| format!("{:.3}", score.value))
                        .unwrap_or_else(|| "n/a".to_string());
                    let next = next
                        .map(|group| group.bracket.label().to_string())
                        .unwrap_or_else(|| "none".to_string());
                    println!(
                        "  Bracket {} completed -> dimension score {:.1}, overall {}, next bracket {}",
                        bracket.label(),
                        dimension_score,
                        overall,
                        next
                    );
                }
            }
        }
    }

    match service.overall(&user) {
        Ok(overall) => println!(
            "\nFinal overall score: {:.3} over weight mass {:.2}",
            overall.value, overall.total_weight
        ),
        Err(ServiceError::NotStarted(_)) => {
            println!("\nNo scores recorded; the assessment has not started")
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn canned_answers(
    registry: &GroupRegistry,
    dimension: Dimension,
    bracket: maturity_engine::assessment::Bracket,
    group_index: usize,
) -> Result<AnswerRecord, maturity_engine::assessment::CatalogError> {
    let group = registry.group(dimension, bracket, group_index)?;
    let mut answers = AnswerRecord::new();
    for field in &group.required {
        let value = match field.shape {
            AnswerShape::Text => {
                AnswerValue::Text(format!("demo answer for {}", field.key))
            }
            AnswerShape::MultiSelect => {
                AnswerValue::Multi(vec!["demo selection".to_string()])
            }
        };
        answers.insert(field.key.clone(), value);
    }
    Ok(answers)
}
