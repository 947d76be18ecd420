use serde::{Deserialize, Serialize};
use std::fmt;

/// States of the simulated authentication pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    Idle,
    Loading,
    Analyzing,
    Reprocessing,
    Lesr,
    FeatureExtraction,
    Authenticating,
}

impl PipelineStage {
    pub fn percent(self) -> u8 {
        match self {
            PipelineStage::Idle => 0,
            PipelineStage::Loading => 20,
            PipelineStage::Analyzing => 40,
            PipelineStage::Reprocessing => 50,
            PipelineStage::Lesr => 60,
            PipelineStage::FeatureExtraction => 80,
            PipelineStage::Authenticating => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::Idle => "Ready",
            PipelineStage::Loading => "Loading audio file...",
            PipelineStage::Analyzing => "Analyzing audio properties...",
            PipelineStage::Reprocessing => "Reprocessing with new parameters...",
            PipelineStage::Lesr => "Running LESR preprocessing...",
            PipelineStage::FeatureExtraction => "Extracting acoustic features...",
            PipelineStage::Authenticating => "Authenticating...",
        }
    }

    pub fn is_idle(self) -> bool {
        self == PipelineStage::Idle
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which entry point started a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunKind {
    Upload,
    Sample(u32),
    Reprocess,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_follow_pipeline_order() {
        let order = [
            PipelineStage::Idle,
            PipelineStage::Loading,
            PipelineStage::Analyzing,
            PipelineStage::Lesr,
            PipelineStage::FeatureExtraction,
            PipelineStage::Authenticating,
        ];
        assert!(order.windows(2).all(|w| w[0].percent() < w[1].percent()));
        assert_eq!(PipelineStage::Reprocessing.percent(), 50);
    }
}
