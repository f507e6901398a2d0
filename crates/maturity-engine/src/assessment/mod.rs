//! Adaptive maturity assessment engine.
//!
//! Answers are collected in question groups staged along a ladder of score
//! brackets. Completing a bracket fixes a per-dimension score, and the
//! overall maturity score is a weighted mean over every known score.

pub mod aggregate;
pub mod bracket;
pub mod branch;
pub mod catalog;
pub mod completion;
pub mod domain;
pub mod registry;
pub mod repository;
pub mod router;
pub mod service;
pub mod weights;

pub use aggregate::{compute_overall, InsufficientDataError};
pub use bracket::{Bracket, OutOfRangeError};
pub use branch::{entry_bracket, next_group, on_submission, GroupRef, NextGroup, SubmissionOutcome};
pub use completion::{check_group, strip_helper_keys, GroupCompletion};
pub use domain::{AnswerRecord, AnswerValue, AssessmentProfile, Dimension, OverallScore, UserId};
pub use registry::{AnswerShape, CatalogError, FieldSpec, GroupRegistry, GroupSpec};
pub use repository::{ProfileRepository, RepositoryError, VersionedProfile};
pub use router::assessment_router;
pub use service::{AssessmentService, ProgressView, ServiceError, SubmissionReport};

#[cfg(test)]
mod tests;
