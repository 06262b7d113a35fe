//! # Base Reset Flow
//!
//! Whether a new generation can still be shipped as a stash against its base.

#[cfg(test)]
mod tests {
    use crate::fixtures::{fs_service, fs_service_with, generation, versions};
    use mlbf_cascade::domain::BLOCKED_ARTIFACT;
    use mlbf_cascade::{Metrics, MlbfApi, MlbfConfigBuilder, MlbfError, VersionPair};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn with_extra(base: &[VersionPair], extra: std::ops::Range<usize>) -> Vec<VersionPair> {
        let mut all = base.to_vec();
        all.extend(versions("new", extra));
        all
    }

    #[test]
    fn test_drift_of_500_keeps_base() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let base = versions("b", 0..100);
        let not_blocked = versions("n", 0..100);

        service
            .generate_and_write(&generation("1"), &base, &not_blocked)
            .unwrap();
        service
            .generate_and_write(&generation("2"), &with_extra(&base, 0..500), &not_blocked)
            .unwrap();

        assert!(!service
            .should_reset_base(&generation("2"), &generation("1"))
            .unwrap());
    }

    #[test]
    fn test_drift_of_501_requires_reset() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let base = versions("b", 0..100);
        let not_blocked = versions("n", 0..100);

        service
            .generate_and_write(&generation("1"), &base, &not_blocked)
            .unwrap();
        service
            .generate_and_write(&generation("2"), &with_extra(&base, 0..501), &not_blocked)
            .unwrap();

        assert!(service
            .should_reset_base(&generation("2"), &generation("1"))
            .unwrap());
    }

    #[test]
    fn test_removals_count_toward_drift() {
        let dir = TempDir::new().unwrap();
        let config = MlbfConfigBuilder::new()
            .base_replace_threshold(10)
            .build()
            .unwrap();
        let service = fs_service_with(dir.path(), config);
        let not_blocked = versions("n", 0..20);

        service
            .generate_and_write(&generation("1"), &versions("b", 0..20), &not_blocked)
            .unwrap();
        // 6 removed, 5 added
        service
            .generate_and_write(&generation("2"), &versions("b", 6..25), &not_blocked)
            .unwrap();

        assert!(service
            .should_reset_base(&generation("2"), &generation("1"))
            .unwrap());
    }

    #[test]
    fn test_missing_base_bootstraps() {
        let dir = TempDir::new().unwrap();
        let metrics = Arc::new(Metrics::new());
        let service = fs_service(dir.path()).with_metrics(metrics.clone());

        service
            .generate_and_write(&generation("1"), &versions("b", 0..5), &versions("n", 0..5))
            .unwrap();

        assert!(service
            .should_reset_base(&generation("1"), &generation("0"))
            .unwrap());
        assert_eq!(metrics.snapshot().base_resets_required, 1);
    }

    #[test]
    fn test_malformed_base_snapshot_is_fatal() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());

        service
            .generate_and_write(&generation("2"), &versions("b", 0..5), &versions("n", 0..5))
            .unwrap();
        let base_dir = dir.path().join("1");
        std::fs::create_dir_all(&base_dir).unwrap();
        std::fs::write(base_dir.join(BLOCKED_ARTIFACT), b"[\"g1:1.0\",").unwrap();

        let result = service.should_reset_base(&generation("2"), &generation("1"));
        assert!(
            matches!(result, Err(MlbfError::MalformedSnapshot { .. })),
            "expected malformed snapshot error, got {result:?}"
        );
    }

    #[test]
    fn test_missing_current_snapshot_is_fatal() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());

        service
            .generate_and_write(&generation("1"), &versions("b", 0..5), &versions("n", 0..5))
            .unwrap();

        assert!(service
            .should_reset_base(&generation("2"), &generation("1"))
            .is_err());
    }
}
