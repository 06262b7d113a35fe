//! MLBF Service
//!
//! Runs one generation build end to end (encode, build, verify, persist)
//! and answers the stash and base-reset questions for the scheduler.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::domain::{
    BaseResetPolicy, BuildStats, Cascade, Generation, GenerationId, Key, MlbfConfig, Salt, Stash,
    VersionPair, BLOCKED_ARTIFACT, FILTER_ARTIFACT, NOT_BLOCKED_ARTIFACT, STASH_ARTIFACT,
};
use crate::error::{MlbfError, StoreError};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{ArtifactStore, MlbfApi, VersionId, VersionSource};

/// MLBF Service implementation
///
/// Implements the `MlbfApi` port on top of an injected artifact store.
pub struct MlbfService<S: ArtifactStore> {
    store: Arc<S>,
    config: MlbfConfig,
    metrics: Arc<dyn MetricsRecorder>,
    /// Fixed salt for reproducible builds; a fresh random salt otherwise
    salt: Option<Salt>,
}

impl<S: ArtifactStore> MlbfService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, MlbfConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: MlbfConfig) -> Self {
        Self {
            store,
            config,
            metrics: Arc::new(NoOpMetrics),
            salt: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Use the same salt for every build
    pub fn with_fixed_salt(mut self, salt: Salt) -> Self {
        self.salt = Some(salt);
        self
    }

    pub fn config(&self) -> &MlbfConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn next_salt(&self) -> Salt {
        self.salt.unwrap_or_else(Salt::random)
    }

    /// Write every artifact of a built generation
    ///
    /// `blocked.json` goes last: a generation without it is never treated
    /// as a valid diff reference. Snapshots left by an earlier attempt at the
    /// same id are removed before the new filter lands.
    fn publish(&self, generation: Generation) -> Result<BuildStats, MlbfError> {
        let Generation {
            id,
            blocked,
            not_blocked,
            cascade,
            mut stats,
            ..
        } = generation;

        self.store.remove(&id, BLOCKED_ARTIFACT)?;
        self.store.remove(&id, STASH_ARTIFACT)?;

        let filter = cascade.to_bytes();
        self.write_artifact(&id, FILTER_ARTIFACT, &filter)?;
        stats.filter_size = Some(filter.len() as u64);

        self.write_json(&id, NOT_BLOCKED_ARTIFACT, &not_blocked)?;
        self.write_json(&id, BLOCKED_ARTIFACT, &blocked)?;

        Ok(stats)
    }

    fn write_artifact(&self, id: &GenerationId, name: &str, bytes: &[u8]) -> Result<(), MlbfError> {
        info!(path = %self.store.location(id, name), bytes = bytes.len(), "Writing artifact");
        self.store.write(id, name, bytes)?;
        self.metrics.record_artifact_written(bytes.len());
        Ok(())
    }

    fn write_json<T: Serialize>(
        &self,
        id: &GenerationId,
        name: &str,
        value: &T,
    ) -> Result<(), MlbfError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| MlbfError::Serialization(e.to_string()))?;
        self.write_artifact(id, name, &bytes)
    }

    fn load_json<T: DeserializeOwned>(
        &self,
        id: &GenerationId,
        name: &str,
    ) -> Result<T, MlbfError> {
        let bytes = self.store.read(id, name)?;
        serde_json::from_slice(&bytes).map_err(|e| MlbfError::MalformedSnapshot {
            artifact: self.store.location(id, name),
            message: e.to_string(),
        })
    }
}

impl<S: ArtifactStore> MlbfApi for MlbfService<S> {
    fn generate_and_write(
        &self,
        id: &GenerationId,
        blocked: &[VersionPair],
        not_blocked: &[VersionPair],
    ) -> Result<BuildStats, MlbfError> {
        let started = Instant::now();
        info!(generation = %id, "Generating filter");

        let result = Generation::build(
            id.clone(),
            blocked,
            not_blocked,
            &self.config,
            self.next_salt(),
        )
        .and_then(|generation| {
            debug!(
                generation = %id,
                layers = generation.stats.layer_count,
                bits = generation.stats.bit_count,
                "Filter cascade built"
            );
            self.publish(generation)
        });

        match result {
            Ok(stats) => {
                self.metrics
                    .record_build(stats.layer_count, stats.bit_count, started.elapsed());
                info!(
                    generation = %id,
                    stats = %serde_json::to_string(&stats).unwrap_or_default(),
                    "Filter generation complete"
                );
                Ok(stats)
            }
            Err(e) => {
                self.metrics.record_build_failed();
                error!(generation = %id, error = %e, "Filter generation failed");
                Err(e)
            }
        }
    }

    fn generate_from_source(
        &self,
        id: &GenerationId,
        source: &dyn VersionSource,
    ) -> Result<BuildStats, MlbfError> {
        let blocked_versions = source.blocked_versions()?;
        let excluding: Vec<VersionId> = blocked_versions.keys().copied().collect();
        let not_blocked = source.all_versions(&excluding)?;
        let blocked: Vec<VersionPair> = blocked_versions.into_values().collect();

        debug!(
            generation = %id,
            blocked = blocked.len(),
            not_blocked = not_blocked.len(),
            "Resolved version lists"
        );

        self.generate_and_write(id, &blocked, &not_blocked)
    }

    fn write_stash(&self, id: &GenerationId, previous: &GenerationId) -> Result<Stash, MlbfError> {
        let previous_blocked = self.load_blocked(previous)?;
        let current_blocked = self.load_blocked(id)?;

        let stash = Stash::between(&previous_blocked, &current_blocked);
        self.write_json(id, STASH_ARTIFACT, &stash)?;
        self.metrics
            .record_stash(stash.blocked.len(), stash.unblocked.len());

        info!(
            generation = %id,
            previous = %previous,
            blocked = stash.blocked.len(),
            unblocked = stash.unblocked.len(),
            "Stash written"
        );
        Ok(stash)
    }

    fn should_reset_base(&self, id: &GenerationId, base: &GenerationId) -> Result<bool, MlbfError> {
        let current = self.load_blocked(id)?;

        let base_blocked = match self.load_blocked(base) {
            Ok(keys) => Some(keys),
            Err(MlbfError::Store(StoreError::NotFound { path })) => {
                info!(base = %base, path = %path, "Base generation has no blocked snapshot");
                None
            }
            Err(e) => return Err(e),
        };

        let policy = BaseResetPolicy::new(self.config.base_replace_threshold);
        let reset = policy.should_reset(&current, base_blocked.as_deref());
        self.metrics.record_reset_decision(reset);

        info!(
            generation = %id,
            base = %base,
            threshold = policy.threshold(),
            reset,
            "Base reset decision"
        );
        Ok(reset)
    }

    fn load_blocked(&self, id: &GenerationId) -> Result<Vec<Key>, MlbfError> {
        self.load_json(id, BLOCKED_ARTIFACT)
    }

    fn load_not_blocked(&self, id: &GenerationId) -> Result<Vec<Key>, MlbfError> {
        self.load_json(id, NOT_BLOCKED_ARTIFACT)
    }

    fn load_stash(&self, id: &GenerationId) -> Result<Stash, MlbfError> {
        self.load_json(id, STASH_ARTIFACT)
    }

    fn load_cascade(&self, id: &GenerationId) -> Result<Cascade, MlbfError> {
        let bytes = self.store.read(id, FILTER_ARTIFACT)?;
        Ok(Cascade::from_bytes(&bytes)?)
    }
}
