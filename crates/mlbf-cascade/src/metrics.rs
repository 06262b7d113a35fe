//! Metrics hooks for generation builds
//!
//! Counters describing build outcomes, cascade sizes, artifact volume,
//! stashes and base-reset decisions.
//!
//! ## Usage
//!
//! ```ignore
//! use mlbf_cascade::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//! metrics.record_build(stats.layer_count, stats.bit_count, elapsed);
//! let snapshot = metrics.snapshot();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Thread-safe build counters
#[derive(Default)]
pub struct Metrics {
    pub builds_completed: AtomicU64,
    pub builds_failed: AtomicU64,
    /// Layers across all completed builds
    pub layers_built: AtomicU64,
    /// Bits across all completed builds
    pub bits_built: AtomicU64,
    pub artifact_bytes_written: AtomicU64,
    pub stashes_written: AtomicU64,
    pub stash_keys_blocked: AtomicU64,
    pub stash_keys_unblocked: AtomicU64,
    pub base_resets_required: AtomicU64,
    pub base_resets_skipped: AtomicU64,
    /// Cumulative build time in milliseconds
    pub build_time_ms: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_build(&self, layers: usize, bits: usize, duration: Duration) {
        self.builds_completed.fetch_add(1, Ordering::Relaxed);
        self.layers_built.fetch_add(layers as u64, Ordering::Relaxed);
        self.bits_built.fetch_add(bits as u64, Ordering::Relaxed);
        self.build_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_build_failed(&self) {
        self.builds_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_artifact_written(&self, bytes: usize) {
        self.artifact_bytes_written
            .fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_stash(&self, blocked: usize, unblocked: usize) {
        self.stashes_written.fetch_add(1, Ordering::Relaxed);
        self.stash_keys_blocked
            .fetch_add(blocked as u64, Ordering::Relaxed);
        self.stash_keys_unblocked
            .fetch_add(unblocked as u64, Ordering::Relaxed);
    }

    pub fn record_reset_decision(&self, reset_required: bool) {
        if reset_required {
            self.base_resets_required.fetch_add(1, Ordering::Relaxed);
        } else {
            self.base_resets_skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            builds_completed: self.builds_completed.load(Ordering::Relaxed),
            builds_failed: self.builds_failed.load(Ordering::Relaxed),
            layers_built: self.layers_built.load(Ordering::Relaxed),
            bits_built: self.bits_built.load(Ordering::Relaxed),
            artifact_bytes_written: self.artifact_bytes_written.load(Ordering::Relaxed),
            stashes_written: self.stashes_written.load(Ordering::Relaxed),
            stash_keys_blocked: self.stash_keys_blocked.load(Ordering::Relaxed),
            stash_keys_unblocked: self.stash_keys_unblocked.load(Ordering::Relaxed),
            base_resets_required: self.base_resets_required.load(Ordering::Relaxed),
            base_resets_skipped: self.base_resets_skipped.load(Ordering::Relaxed),
            avg_build_ms: self.avg_build_time_ms(),
        }
    }

    pub fn avg_build_time_ms(&self) -> u64 {
        let total = self.build_time_ms.load(Ordering::Relaxed);
        let count = self.builds_completed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.builds_completed,
            &self.builds_failed,
            &self.layers_built,
            &self.bits_built,
            &self.artifact_bytes_written,
            &self.stashes_written,
            &self.stash_keys_blocked,
            &self.stash_keys_unblocked,
            &self.base_resets_required,
            &self.base_resets_skipped,
            &self.build_time_ms,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub builds_completed: u64,
    pub builds_failed: u64,
    pub layers_built: u64,
    pub bits_built: u64,
    pub artifact_bytes_written: u64,
    pub stashes_written: u64,
    pub stash_keys_blocked: u64,
    pub stash_keys_unblocked: u64,
    pub base_resets_required: u64,
    pub base_resets_skipped: u64,
    pub avg_build_ms: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward build events to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_build(&self, layers: usize, bits: usize, duration: Duration);

    fn record_build_failed(&self);

    fn record_artifact_written(&self, bytes: usize);

    fn record_stash(&self, blocked: usize, unblocked: usize);

    fn record_reset_decision(&self, reset_required: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_build(&self, _: usize, _: usize, _: Duration) {}
    fn record_build_failed(&self) {}
    fn record_artifact_written(&self, _: usize) {}
    fn record_stash(&self, _: usize, _: usize) {}
    fn record_reset_decision(&self, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_build(&self, layers: usize, bits: usize, duration: Duration) {
        Metrics::record_build(self, layers, bits, duration);
    }

    fn record_build_failed(&self) {
        Metrics::record_build_failed(self);
    }

    fn record_artifact_written(&self, bytes: usize) {
        Metrics::record_artifact_written(self, bytes);
    }

    fn record_stash(&self, blocked: usize, unblocked: usize) {
        Metrics::record_stash(self, blocked, unblocked);
    }

    fn record_reset_decision(&self, reset_required: bool) {
        Metrics::record_reset_decision(self, reset_required);
    }
}
