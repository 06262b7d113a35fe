//! # Stash Flow
//!
//! Consecutive generations and the stash describing what changed between them.

#[cfg(test)]
mod tests {
    use crate::fixtures::{fs_service, generation, versions};
    use mlbf_cascade::domain::STASH_ARTIFACT;
    use mlbf_cascade::{diff, encode_key, MlbfApi, Stash};
    use tempfile::TempDir;

    #[test]
    fn test_stash_records_newly_blocked_and_unblocked() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let (first, second) = (generation("100"), generation("200"));

        // g2 gets blocked, g1 gets unblocked
        let mut blocked_1 = versions("keep", 0..3);
        blocked_1.push(("g1", "1.0").into());
        let mut blocked_2 = versions("keep", 0..3);
        blocked_2.push(("g2", "1.0").into());
        let not_blocked = versions("n", 0..100);

        service
            .generate_and_write(&first, &blocked_1, &not_blocked)
            .unwrap();
        service
            .generate_and_write(&second, &blocked_2, &not_blocked)
            .unwrap();

        let stash = service.write_stash(&second, &first).unwrap();
        assert_eq!(stash.blocked, vec![encode_key("g2", "1.0")]);
        assert_eq!(stash.unblocked, vec![encode_key("g1", "1.0")]);

        let raw = std::fs::read(dir.path().join("200").join(STASH_ARTIFACT)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"blocked": ["g2:1.0"], "unblocked": ["g1:1.0"]})
        );
    }

    #[test]
    fn test_identical_generations_give_empty_stash() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let blocked = versions("b", 0..10);
        let not_blocked = versions("n", 0..10);

        service
            .generate_and_write(&generation("1"), &blocked, &not_blocked)
            .unwrap();
        service
            .generate_and_write(&generation("2"), &blocked, &not_blocked)
            .unwrap();

        let stash = service.write_stash(&generation("2"), &generation("1")).unwrap();
        assert!(stash.is_empty());
        assert_eq!(service.load_stash(&generation("2")).unwrap(), Stash::default());
    }

    #[test]
    fn test_stash_applied_to_previous_gives_current() {
        let dir = TempDir::new().unwrap();
        let service = fs_service(dir.path());
        let not_blocked = versions("n", 0..50);

        service
            .generate_and_write(&generation("1"), &versions("b", 0..40), &not_blocked)
            .unwrap();
        service
            .generate_and_write(&generation("2"), &versions("b", 25..60), &not_blocked)
            .unwrap();

        let previous = service.load_blocked(&generation("1")).unwrap();
        let current = service.load_blocked(&generation("2")).unwrap();
        let stash = service.write_stash(&generation("2"), &generation("1")).unwrap();

        let mut rebuilt: std::collections::BTreeSet<_> = previous.iter().cloned().collect();
        for key in &stash.unblocked {
            rebuilt.remove(key);
        }
        rebuilt.extend(stash.blocked.iter().cloned());
        let expected: std::collections::BTreeSet<_> = current.iter().cloned().collect();
        assert_eq!(rebuilt, expected);

        // Same numbers the diff engine reports directly
        assert_eq!(stash.len(), diff(&previous, &current).len());
    }
}
