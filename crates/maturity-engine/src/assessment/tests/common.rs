use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::bracket::Bracket;
use crate::assessment::domain::{AnswerRecord, AnswerValue, Dimension, UserId};
use crate::assessment::registry::{AnswerShape, GroupRegistry};
use crate::assessment::repository::{ProfileRepository, RepositoryError, VersionedProfile};
use crate::assessment::router::assessment_router;
use crate::assessment::service::AssessmentService;
use crate::config::EngineConfig;

pub(super) fn user() -> UserId {
    UserId("user-1".to_string())
}

pub(super) fn registry() -> Arc<GroupRegistry> {
    Arc::new(GroupRegistry::standard())
}

/// Fill valid answers for one group into `answers`.
pub(super) fn fill_group(
    registry: &GroupRegistry,
    answers: &mut AnswerRecord,
    dimension: Dimension,
    bracket: Bracket,
    group_index: usize,
) {
    let group = registry
        .group(dimension, bracket, group_index)
        .expect("catalog group exists");
    for field in &group.required {
        let value = match field.shape {
            AnswerShape::Text => AnswerValue::Text("a considered answer".to_string()),
            AnswerShape::MultiSelect => AnswerValue::Multi(vec!["a selection".to_string()]),
        };
        answers.insert(field.key.clone(), value);
    }
}

pub(super) fn group_answers(
    registry: &GroupRegistry,
    dimension: Dimension,
    bracket: Bracket,
    group_index: usize,
) -> AnswerRecord {
    let mut answers = AnswerRecord::new();
    fill_group(registry, &mut answers, dimension, bracket, group_index);
    answers
}

/// Submit all three groups of a bracket through the service.
pub(super) fn complete_bracket<R: ProfileRepository + 'static>(
    service: &AssessmentService<R>,
    registry: &GroupRegistry,
    user: &UserId,
    dimension: Dimension,
    bracket: Bracket,
) {
    for group_index in 0..3 {
        let answers = group_answers(registry, dimension, bracket, group_index);
        service
            .submit_answers(user, dimension, bracket, group_index, &answers)
            .expect("group submission succeeds");
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryRepository>,
    Arc<MemoryRepository>,
    Arc<GroupRegistry>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let registry = registry();
    let service = AssessmentService::new(
        repository.clone(),
        registry.clone(),
        EngineConfig::default(),
    )
    .expect("standard catalog is well formed");
    (service, repository, registry)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

/// Versioned in-memory store with the same compare-and-set contract as the
/// production repository.
#[derive(Default)]
pub(super) struct MemoryRepository {
    rows: Mutex<HashMap<String, VersionedProfile>>,
}

impl ProfileRepository for MemoryRepository {
    fn fetch(&self, user: &UserId) -> Result<Option<VersionedProfile>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.get(&user.0).cloned())
    }

    fn save(
        &self,
        user: &UserId,
        profile: crate::assessment::domain::AssessmentProfile,
        expected_version: u64,
    ) -> Result<u64, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        let current = guard.get(&user.0).map(|row| row.version).unwrap_or(0);
        if current != expected_version {
            return Err(RepositoryError::VersionConflict);
        }
        let version = expected_version + 1;
        guard.insert(user.0.clone(), VersionedProfile { profile, version });
        Ok(version)
    }
}

/// Rejects the first `conflicts` saves with a version conflict, then behaves
/// like [`MemoryRepository`]. Models a concurrent writer racing the engine.
pub(super) struct FlakyRepository {
    inner: MemoryRepository,
    conflicts_left: Mutex<u32>,
}

impl FlakyRepository {
    pub(super) fn new(conflicts: u32) -> Self {
        Self {
            inner: MemoryRepository::default(),
            conflicts_left: Mutex::new(conflicts),
        }
    }
}

impl ProfileRepository for FlakyRepository {
    fn fetch(&self, user: &UserId) -> Result<Option<VersionedProfile>, RepositoryError> {
        self.inner.fetch(user)
    }

    fn save(
        &self,
        user: &UserId,
        profile: crate::assessment::domain::AssessmentProfile,
        expected_version: u64,
    ) -> Result<u64, RepositoryError> {
        let mut left = self.conflicts_left.lock().expect("conflict mutex poisoned");
        if *left > 0 {
            *left -= 1;
            return Err(RepositoryError::VersionConflict);
        }
        drop(left);
        self.inner.save(user, profile, expected_version)
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn fetch(&self, _user: &UserId) -> Result<Option<VersionedProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(
        &self,
        _user: &UserId,
        _profile: crate::assessment::domain::AssessmentProfile,
        _expected_version: u64,
    ) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
