//! Group completion checks.
//!
//! Presence and shape only: a single-value key needs a string that survives
//! trimming, a multi-value key needs a non-empty array, and any miss fails
//! the whole group. Whether a choice value belongs to the offered option set
//! is the rendering collaborator's concern.

use super::domain::{AnswerRecord, AnswerValue};
use super::registry::{AnswerShape, GroupSpec};

/// Outcome of checking one group against an answer set. Missing or malformed
/// keys are reported by name so the caller can prompt for exactly what is
/// still needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCompletion {
    pub missing: Vec<String>,
}

impl GroupCompletion {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check every required key of `group` against `answers`.
pub fn check_group(group: &GroupSpec, answers: &AnswerRecord) -> GroupCompletion {
    let missing = group
        .required
        .iter()
        .filter(|field| {
            !answers
                .get(&field.key)
                .map(|value| field_satisfied(field.shape, value))
                .unwrap_or(false)
        })
        .map(|field| field.key.clone())
        .collect();
    GroupCompletion { missing }
}

pub fn is_group_complete(group: &GroupSpec, answers: &AnswerRecord) -> bool {
    check_group(group, answers).is_complete()
}

fn field_satisfied(shape: AnswerShape, value: &AnswerValue) -> bool {
    match (shape, value) {
        (AnswerShape::Text, AnswerValue::Text(text)) => !text.trim().is_empty(),
        (AnswerShape::MultiSelect, AnswerValue::Multi(items)) => !items.is_empty(),
        _ => false,
    }
}

/// Drop `_other` helper keys the input widgets attach alongside an "Other"
/// choice. They are never part of a group's required set and must not be
/// persisted.
pub fn strip_helper_keys(answers: &AnswerRecord) -> AnswerRecord {
    answers
        .iter()
        .filter(|(key, _)| !key.ends_with("_other"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::registry::FieldSpec;

    fn group() -> GroupSpec {
        GroupSpec {
            id: "ops_g1_score_2".to_string(),
            required: vec![
                FieldSpec {
                    key: "a".to_string(),
                    shape: AnswerShape::Text,
                },
                FieldSpec {
                    key: "b".to_string(),
                    shape: AnswerShape::MultiSelect,
                },
            ],
        }
    }

    fn answers(pairs: &[(&str, AnswerValue)]) -> AnswerRecord {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn complete_when_every_key_is_valid() {
        let answers = answers(&[
            ("a", AnswerValue::Text("documented".to_string())),
            ("b", AnswerValue::Multi(vec!["crm".to_string()])),
        ]);
        let report = check_group(&group(), &answers);
        assert!(report.is_complete());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn blank_after_trim_fails_the_group() {
        let answers = answers(&[
            ("a", AnswerValue::Text("   ".to_string())),
            ("b", AnswerValue::Multi(vec!["crm".to_string()])),
        ]);
        let report = check_group(&group(), &answers);
        assert_eq!(report.missing, vec!["a".to_string()]);
    }

    #[test]
    fn empty_array_fails_the_group() {
        let answers = answers(&[
            ("a", AnswerValue::Text("x".to_string())),
            ("b", AnswerValue::Multi(Vec::new())),
        ]);
        assert!(!is_group_complete(&group(), &answers));
    }

    #[test]
    fn wrong_shape_fails_the_group() {
        let answers = answers(&[
            ("a", AnswerValue::Multi(vec!["x".to_string()])),
            ("b", AnswerValue::Multi(vec!["crm".to_string()])),
        ]);
        let report = check_group(&group(), &answers);
        assert_eq!(report.missing, vec!["a".to_string()]);
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let answers = answers(&[("a", AnswerValue::Text("x".to_string()))]);
        let report = check_group(&group(), &answers);
        assert_eq!(report.missing, vec!["b".to_string()]);
    }

    #[test]
    fn helper_keys_are_stripped() {
        let answers = answers(&[
            ("a", AnswerValue::Text("x".to_string())),
            ("a_other", AnswerValue::Text("free text".to_string())),
        ]);
        let cleaned = strip_helper_keys(&answers);
        assert!(cleaned.contains_key("a"));
        assert!(!cleaned.contains_key("a_other"));
    }
}
