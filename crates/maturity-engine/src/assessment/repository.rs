use serde::{Deserialize, Serialize};

use super::domain::{AssessmentProfile, UserId};

/// A profile snapshot plus the version observed at read time. The version is
/// handed back on save so concurrent writers cannot silently overwrite each
/// other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProfile {
    pub profile: AssessmentProfile,
    pub version: u64,
}

/// Storage abstraction for user profiles.
///
/// `save` must reject the write with [`RepositoryError::VersionConflict`]
/// when the stored version no longer matches `expected_version`. A missing
/// row saves only with `expected_version` 0 (fresh profile).
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, user: &UserId) -> Result<Option<VersionedProfile>, RepositoryError>;
    fn save(
        &self,
        user: &UserId,
        profile: AssessmentProfile,
        expected_version: u64,
    ) -> Result<u64, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("profile changed since it was read")]
    VersionConflict,
    #[error("profile not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
