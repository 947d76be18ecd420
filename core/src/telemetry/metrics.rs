use serde::Serialize;
use std::sync::Mutex;

/// Tallies of pipeline run outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub completed: usize,
    pub failed: usize,
    /// Runs replaced by a newer run before they finished.
    pub preempted: usize,
    /// Uploads refused because another upload was in flight.
    pub rejected: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<RunCounts>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RunCounts::default()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut RunCounts)) {
        if let Ok(mut counts) = self.inner.lock() {
            apply(&mut counts);
        }
    }

    pub fn record_completed(&self) {
        self.update(|c| c.completed += 1);
    }

    pub fn record_failed(&self) {
        self.update(|c| c.failed += 1);
    }

    pub fn record_preempted(&self) {
        self.update(|c| c.preempted += 1);
    }

    pub fn record_rejected(&self) {
        self.update(|c| c.rejected += 1);
    }

    pub fn snapshot(&self) -> RunCounts {
        self.inner.lock().map(|c| *c).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
