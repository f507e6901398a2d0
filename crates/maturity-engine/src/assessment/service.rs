use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;

use super::aggregate::{compute_overall, InsufficientDataError};
use super::bracket::{Bracket, OutOfRangeError};
use super::branch::{entry_bracket, next_group, on_submission, NextGroup, SubmissionOutcome};
use super::completion::strip_helper_keys;
use super::domain::{AnswerRecord, AssessmentProfile, Dimension, OverallScore, UserId};
use super::registry::{CatalogError, GroupRegistry};
use super::repository::{ProfileRepository, RepositoryError, VersionedProfile};

/// Orchestrates the read-validate-branch-score-write cycle around a profile.
///
/// All scoring is pure; the only shared-mutable hazard is the profile row
/// itself, guarded by optimistic concurrency: each save carries the version
/// observed at read, and a conflict re-runs the whole cycle. Recomputation
/// from identical answers is idempotent, so retries are safe.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    registry: Arc<GroupRegistry>,
    max_write_retries: u32,
}

/// Result of one answer submission, including the refreshed overall score
/// when a bracket completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReport {
    #[serde(flatten)]
    pub outcome: SubmissionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallScore>,
}

/// Per-dimension progress view for the dashboard collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressView {
    pub dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub next: NextGroup,
}

impl<R> AssessmentService<R>
where
    R: ProfileRepository + 'static,
{
    /// Build the service, failing fast when the catalog is malformed.
    pub fn new(
        repository: Arc<R>,
        registry: Arc<GroupRegistry>,
        engine: EngineConfig,
    ) -> Result<Self, CatalogError> {
        registry.validate()?;
        Ok(Self {
            repository,
            registry,
            max_write_retries: engine.max_write_retries,
        })
    }

    /// Submit answers for one group of a dimension's bracket.
    ///
    /// The merged answer set is persisted even when the group is still
    /// incomplete so a user can resume mid-group. When the bracket's last
    /// group completes, the dimension score is fixed and the overall score
    /// re-aggregated before the versioned write.
    pub fn submit_answers(
        &self,
        user: &UserId,
        dimension: Dimension,
        bracket: Bracket,
        group_index: usize,
        answers: &AnswerRecord,
    ) -> Result<SubmissionReport, ServiceError> {
        let patch = strip_helper_keys(answers);
        let mut attempt = 0;
        loop {
            let (mut profile, version) = self.load(user)?;
            profile.answers.extend(patch.clone());

            let outcome = on_submission(
                &self.registry,
                dimension,
                bracket,
                group_index,
                &profile.answers,
            )?;

            let mut overall = None;
            if let SubmissionOutcome::BracketCompleted {
                dimension_score, ..
            } = &outcome
            {
                profile.dimension_scores.insert(dimension, *dimension_score);
                let score = compute_overall(&profile)?;
                overall = Some(score);
                info!(
                    user = %user.0,
                    dimension = dimension.key(),
                    bracket = bracket.label(),
                    dimension_score,
                    overall = score.value,
                    "bracket completed"
                );
            }

            profile.updated_at = Utc::now();
            match self.repository.save(user, profile, version) {
                Ok(_) => {
                    return Ok(SubmissionReport { outcome, overall });
                }
                Err(RepositoryError::VersionConflict) if attempt < self.max_write_retries => {
                    attempt += 1;
                    warn!(
                        user = %user.0,
                        dimension = dimension.key(),
                        attempt,
                        "profile changed during submission, retrying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Record the lighter-weight baseline signal produced by onboarding.
    pub fn record_baseline(
        &self,
        user: &UserId,
        score: f64,
    ) -> Result<OverallScore, ServiceError> {
        if !score.is_finite() || !(1.0..=5.0).contains(&score) {
            return Err(OutOfRangeError(score).into());
        }

        let mut attempt = 0;
        loop {
            let (mut profile, version) = self.load(user)?;
            profile.baseline_score = Some(score);
            let overall = compute_overall(&profile)?;
            profile.updated_at = Utc::now();

            match self.repository.save(user, profile, version) {
                Ok(_) => {
                    info!(user = %user.0, baseline = score, overall = overall.value, "baseline recorded");
                    return Ok(overall);
                }
                Err(RepositoryError::VersionConflict) if attempt < self.max_write_retries => {
                    attempt += 1;
                    warn!(user = %user.0, attempt, "profile changed during baseline write, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// The next group a dimension should serve, derived from stored answers.
    pub fn next_group(&self, user: &UserId, dimension: Dimension) -> Result<NextGroup, ServiceError> {
        let (profile, _) = self.load(user)?;
        let entry = self.entry_for(&profile)?;
        Ok(next_group(&self.registry, dimension, &profile.answers, entry)?)
    }

    /// Progress view for one dimension.
    pub fn progress(
        &self,
        user: &UserId,
        dimension: Dimension,
    ) -> Result<ProgressView, ServiceError> {
        let (profile, _) = self.load(user)?;
        let entry = self.entry_for(&profile)?;
        let next = next_group(&self.registry, dimension, &profile.answers, entry)?;
        Ok(ProgressView {
            dimension,
            score: profile.score_of(dimension),
            next,
        })
    }

    /// Current overall score for the user.
    pub fn overall(&self, user: &UserId) -> Result<OverallScore, ServiceError> {
        let (profile, _) = self.load(user)?;
        Ok(compute_overall(&profile)?)
    }

    fn load(&self, user: &UserId) -> Result<(AssessmentProfile, u64), ServiceError> {
        let stored = self.repository.fetch(user)?;
        Ok(match stored {
            Some(VersionedProfile { profile, version }) => (profile, version),
            None => (AssessmentProfile::new(), 0),
        })
    }

    fn entry_for(&self, profile: &AssessmentProfile) -> Result<Bracket, ServiceError> {
        let overall = compute_overall(profile).ok().map(|score| score.value);
        Ok(entry_bracket(overall)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    NotStarted(#[from] InsufficientDataError),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
}
