//! Branch selection: which question group a dimension serves next.
//!
//! The per-dimension state is the pair (bracket, group index), derived on
//! every call from the answer set rather than stored, so replaying identical
//! answers always lands in the same state. Completing the last group of a
//! bracket fixes the dimension score at the bracket's own label; a finer
//! rubric would replace [`completed_bracket_score`] and nothing else.

use serde::Serialize;

use super::bracket::{Bracket, OutOfRangeError};
use super::completion::{check_group, is_group_complete};
use super::domain::{AnswerRecord, Dimension};
use super::registry::{CatalogError, GroupRegistry};

/// Position of one question group within a dimension's bracket ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupRef {
    pub bracket: Bracket,
    pub group_index: usize,
}

/// What a dimension should serve next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextGroup {
    Serve {
        bracket: Bracket,
        group_index: usize,
    },
    /// Every group of every bracket up to 5.0 is complete.
    DimensionComplete,
}

/// State transition produced by one answer submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Required keys are still missing; the state does not change.
    Incomplete { missing: Vec<String> },
    /// The group is complete and more groups remain in this bracket.
    GroupAdvanced { next: GroupRef },
    /// The bracket's last group completed: the dimension score is fixed at
    /// the bracket label and the next bracket (if any) starts at group 0.
    BracketCompleted {
        dimension_score: f64,
        next: Option<GroupRef>,
    },
}

/// The dimension score awarded for finishing a bracket.
pub fn completed_bracket_score(bracket: Bracket) -> f64 {
    bracket.value()
}

/// Bracket at which a dimension interaction starts.
///
/// Question groups are staged by the stored overall score when one exists; a
/// profile with no overall score starts at the bottom of the ladder.
pub fn entry_bracket(overall: Option<f64>) -> Result<Bracket, OutOfRangeError> {
    match overall {
        Some(score) => Bracket::resolve(score),
        None => Ok(Bracket::B1_0),
    }
}

/// Walk the bracket ladder from `entry` and return the first group whose
/// required keys are not yet satisfied.
pub fn next_group(
    registry: &GroupRegistry,
    dimension: Dimension,
    answers: &AnswerRecord,
    entry: Bracket,
) -> Result<NextGroup, CatalogError> {
    let start = Bracket::ALL
        .iter()
        .position(|bracket| *bracket == entry)
        .unwrap_or(0);

    for bracket in Bracket::ALL[start..].iter().copied() {
        let groups = registry.groups(dimension, bracket)?;
        for (group_index, group) in groups.iter().enumerate() {
            if !is_group_complete(group, answers) {
                return Ok(NextGroup::Serve {
                    bracket,
                    group_index,
                });
            }
        }
    }

    Ok(NextGroup::DimensionComplete)
}

/// Apply one submission for `(dimension, bracket, group_index)`.
///
/// Pure: the same answers always produce the same outcome, so retried writes
/// and duplicate submissions are safe to replay.
pub fn on_submission(
    registry: &GroupRegistry,
    dimension: Dimension,
    bracket: Bracket,
    group_index: usize,
    answers: &AnswerRecord,
) -> Result<SubmissionOutcome, CatalogError> {
    let groups = registry.groups(dimension, bracket)?;
    let group = groups
        .get(group_index)
        .ok_or(CatalogError::GroupIndexOutOfRange {
            dimension: dimension.key(),
            bracket: bracket.label(),
            index: group_index,
        })?;

    let report = check_group(group, answers);
    if !report.is_complete() {
        return Ok(SubmissionOutcome::Incomplete {
            missing: report.missing,
        });
    }

    if group_index + 1 < groups.len() {
        return Ok(SubmissionOutcome::GroupAdvanced {
            next: GroupRef {
                bracket,
                group_index: group_index + 1,
            },
        });
    }

    Ok(SubmissionOutcome::BracketCompleted {
        dimension_score: completed_bracket_score(bracket),
        next: bracket.next().map(|next| GroupRef {
            bracket: next,
            group_index: 0,
        }),
    })
}
