use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays of the upload path, each measured from the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadTimings {
    pub lesr_ms: u64,
    pub feature_ms: u64,
    pub auth_ms: u64,
}

impl Default for UploadTimings {
    fn default() -> Self {
        Self {
            lesr_ms: 1000,
            feature_ms: 800,
            auth_ms: 600,
        }
    }
}

/// Sample-path offsets from the start of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleTimings {
    pub analyze_ms: u64,
    pub lesr_ms: u64,
    pub feature_ms: u64,
    pub auth_ms: u64,
    pub complete_ms: u64,
}

impl Default for SampleTimings {
    fn default() -> Self {
        Self {
            analyze_ms: 500,
            lesr_ms: 1000,
            feature_ms: 2000,
            auth_ms: 2800,
            complete_ms: 3500,
        }
    }
}

/// Reprocess-path offsets from the start of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReprocessTimings {
    pub lesr_ms: u64,
    pub feature_ms: u64,
    pub auth_ms: u64,
    pub complete_ms: u64,
}

impl Default for ReprocessTimings {
    fn default() -> Self {
        Self {
            lesr_ms: 500,
            feature_ms: 1000,
            auth_ms: 1500,
            complete_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTimings {
    pub upload: UploadTimings,
    pub sample: SampleTimings,
    pub reprocess: ReprocessTimings,
}

impl PipelineTimings {
    /// Same schedule with every delay multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let s = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            upload: UploadTimings {
                lesr_ms: s(self.upload.lesr_ms),
                feature_ms: s(self.upload.feature_ms),
                auth_ms: s(self.upload.auth_ms),
            },
            sample: SampleTimings {
                analyze_ms: s(self.sample.analyze_ms),
                lesr_ms: s(self.sample.lesr_ms),
                feature_ms: s(self.sample.feature_ms),
                auth_ms: s(self.sample.auth_ms),
                complete_ms: s(self.sample.complete_ms),
            },
            reprocess: ReprocessTimings {
                lesr_ms: s(self.reprocess.lesr_ms),
                feature_ms: s(self.reprocess.feature_ms),
                auth_ms: s(self.reprocess.auth_ms),
                complete_ms: s(self.reprocess.complete_ms),
            },
        }
    }

    /// Scripted offsets must never step backwards.
    pub fn is_monotonic(&self) -> bool {
        let sample = [
            self.sample.analyze_ms,
            self.sample.lesr_ms,
            self.sample.feature_ms,
            self.sample.auth_ms,
            self.sample.complete_ms,
        ];
        let reprocess = [
            self.reprocess.lesr_ms,
            self.reprocess.feature_ms,
            self.reprocess.auth_ms,
            self.reprocess.complete_ms,
        ];
        sample.windows(2).all(|w| w[0] <= w[1]) && reprocess.windows(2).all(|w| w[0] <= w[1])
    }
}

pub(crate) fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_monotonic() {
        assert!(PipelineTimings::default().is_monotonic());
        let mut broken = PipelineTimings::default();
        broken.sample.feature_ms = 100;
        assert!(!broken.is_monotonic());
    }

    #[test]
    fn scaling_shrinks_every_delay() {
        let fast = PipelineTimings::default().scaled(0.01);
        assert_eq!(fast.sample.complete_ms, 35);
        assert_eq!(fast.upload.lesr_ms, 10);
        assert_eq!(fast.reprocess.complete_ms, 20);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let timings: PipelineTimings =
            serde_json::from_str(r#"{"sample":{"analyze_ms":10}}"#).unwrap();
        assert_eq!(timings.sample.analyze_ms, 10);
        assert_eq!(timings.sample.lesr_ms, 1000);
        assert_eq!(timings.upload, UploadTimings::default());
    }
}
