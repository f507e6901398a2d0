use maturity_engine::assessment::{
    AssessmentProfile, ProfileRepository, RepositoryError, UserId, VersionedProfile,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Versioned in-memory profile store. Saves are compare-and-set: the write
/// only lands when the stored version still matches the version the caller
/// observed at read time.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    rows: Arc<Mutex<HashMap<String, VersionedProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, user: &UserId) -> Result<Option<VersionedProfile>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.get(&user.0).cloned())
    }

    fn save(
        &self,
        user: &UserId,
        profile: AssessmentProfile,
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
