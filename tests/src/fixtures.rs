//! Shared fixtures: deterministic version lists and service setup.

use mlbf_cascade::{FsArtifactStore, GenerationId, MlbfConfig, MlbfService, Salt, VersionPair};
use mlbf_telemetry::TelemetryConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::{Arc, Once};

static LOGGING: Once = Once::new();

/// Install a quiet subscriber once per test binary
pub fn init_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::for_job("tests")
        };
        // Another harness may already own the global subscriber
        let _ = mlbf_telemetry::init_telemetry(config);
    });
}

/// `count` versions of distinct add-ons, `"{prefix}{i}@example.com"` at `1.0`
pub fn versions(prefix: &str, range: std::ops::Range<usize>) -> Vec<VersionPair> {
    range
        .map(|i| VersionPair::new(format!("{prefix}{i}@example.com"), "1.0"))
        .collect()
}

/// Random 16-byte hex guids from a seeded generator
pub fn random_versions(rng: &mut StdRng, count: usize) -> Vec<VersionPair> {
    (0..count)
        .map(|_| {
            let guid: [u8; 16] = rng.gen();
            VersionPair::new(hex::encode(guid), "1.0")
        })
        .collect()
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn generation(raw: &str) -> GenerationId {
    GenerationId::new(raw).expect("valid generation id")
}

/// Service over a filesystem store rooted at `root`, with a fixed salt
pub fn fs_service(root: &Path) -> MlbfService<FsArtifactStore> {
    fs_service_with(root, MlbfConfig::default())
}

pub fn fs_service_with(root: &Path, mut config: MlbfConfig) -> MlbfService<FsArtifactStore> {
    init_logging();
    config.storage_root = root.to_path_buf();
    let store = Arc::new(FsArtifactStore::from_config(&config));
    MlbfService::with_config(store, config).with_fixed_salt(Salt::new([0x5a; 16]))
}
