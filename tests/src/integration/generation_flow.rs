//! # Generation Flow
//!
//! Build a generation, persist it, reload the filter from disk and query it
//! the way a client would.

#[cfg(test)]
mod tests {
    use crate::fixtures::{fs_service, fs_service_with, generation, versions};
    use mlbf_cascade::domain::{BLOCKED_ARTIFACT, FILTER_ARTIFACT, NOT_BLOCKED_ARTIFACT};
    use mlbf_cascade::{
        encode_key, Cascade, FormatError, HashAlgorithm, MlbfApi, MlbfConfigBuilder, MlbfError,
        StaticVersionSource, VersionPair,
    };
    use tempfile::TempDir;

    #[test]
    fn test_blocked_versions_resolve_after_reload() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let id = generation("1700000000000");

        let blocked = vec![VersionPair::new("g1", "1.0"), VersionPair::new("g2", "1.1")];
        let not_blocked = vec![VersionPair::new("g3", "1.0"), VersionPair::new("g4", "2.0")];

        let stats = service
            .generate_and_write(&id, &blocked, &not_blocked)
            .unwrap();
        assert_eq!(stats.blocked_count, 2);
        assert_eq!(stats.not_blocked_count, 2);

        // Client side: only the blob
        let blob = std::fs::read(dir.path().join("1700000000000").join(FILTER_ARTIFACT)).unwrap();
        let cascade = Cascade::from_bytes(&blob).unwrap();

        assert!(cascade.is_version_blocked("g1", "1.0"));
        assert!(cascade.is_version_blocked("g2", "1.1"));
        assert!(!cascade.is_version_blocked("g3", "1.0"));
        assert!(!cascade.is_version_blocked("g4", "2.0"));
    }

    #[test]
    fn test_artifacts_land_in_generation_directory() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let id = generation("42");

        let stats = service
            .generate_and_write(&id, &versions("b", 0..30), &versions("n", 0..300))
            .unwrap();

        let root = dir.path().join("42");
        for name in [FILTER_ARTIFACT, BLOCKED_ARTIFACT, NOT_BLOCKED_ARTIFACT] {
            assert!(root.join(name).is_file(), "missing artifact {name}");
        }
        let filter_len = std::fs::metadata(root.join(FILTER_ARTIFACT)).unwrap().len();
        assert_eq!(stats.filter_size, Some(filter_len));

        // Snapshot is a plain JSON array of keys
        let raw = std::fs::read(root.join(BLOCKED_ARTIFACT)).unwrap();
        let keys: Vec<String> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(keys.len(), 30);
        assert!(keys.contains(&"b0@example.com:1.0".to_string()));
    }

    #[test]
    fn test_stats_describe_the_build() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());

        let stats = service
            .generate_and_write(&generation("1"), &versions("b", 0..100), &versions("n", 0..1000))
            .unwrap();

        assert!(stats.layer_count >= 1);
        assert_eq!(stats.fprs.len(), 2);
        assert!((stats.fprs[0] - 100.0 / (2f64.sqrt() * 1000.0)).abs() < 1e-12);
        assert_eq!(stats.fprs[1], 0.5);
        assert_eq!(stats.hash_algorithm, HashAlgorithm::Sha256);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["blocked_count"], 100);
        assert_eq!(json["not_blocked_count"], 1000);
    }

    #[test]
    fn test_murmur3_generation_reloads() {
        let dir = TempDir::new().unwrap();
        let config = MlbfConfigBuilder::new()
            .hash_algorithm(HashAlgorithm::Murmur3)
            .build()
            .unwrap();
        let service = fs_service_with(dir.path(), config);
        let id = generation("7");

        let blocked = versions("b", 0..50);
        let not_blocked = versions("n", 0..500);
        service
            .generate_and_write(&id, &blocked, &not_blocked)
            .unwrap();

        let cascade = service.load_cascade(&id).unwrap();
        assert_eq!(cascade.hash_algorithm(), HashAlgorithm::Murmur3);
        assert!(blocked.iter().all(|v| cascade.is_blocked(&v.key())));
        assert!(not_blocked.iter().all(|v| !cascade.is_blocked(&v.key())));
    }

    #[test]
    fn test_generation_from_source() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let id = generation("9");

        let source = StaticVersionSource::new()
            .with_blocked_version(10, ("legacy@example.com", "0.9"))
            .with_version(11, ("legacy@example.com", "1.0"))
            .with_version(12, ("other@example.com", "3.1"))
            .with_blocked_version(13, ("bad@example.com", "6.6"));

        service.generate_from_source(&id, &source).unwrap();

        let blocked = service.load_blocked(&id).unwrap();
        assert_eq!(
            blocked,
            vec![
                encode_key("legacy@example.com", "0.9"),
                encode_key("bad@example.com", "6.6"),
            ]
        );
        let cascade = service.load_cascade(&id).unwrap();
        assert!(cascade.is_version_blocked("bad@example.com", "6.6"));
        assert!(!cascade.is_version_blocked("legacy@example.com", "1.0"));
    }

    #[test]
    fn test_corrupt_filter_is_rejected() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let id = generation("3");
        service
            .generate_and_write(&id, &versions("b", 0..5), &versions("n", 0..5))
            .unwrap();

        let path = dir.path().join("3").join(FILTER_ARTIFACT);
        let mut blob = std::fs::read(&path).unwrap();
        blob.truncate(blob.len() - 1);
        std::fs::write(&path, blob).unwrap();

        assert!(matches!(
            service.load_cascade(&id),
            Err(MlbfError::Format(FormatError::Truncated { .. }))
        ));
    }
}
