use crate::pipeline::PipelineStage;
use log::{info, warn};

/// Thin wrapper so every pipeline message goes out under one target.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    pub fn stage(&self, run: u64, stage: PipelineStage, label: &str) {
        info!(
            target: self.target,
            "run {} -> {:?} ({}%): {}",
            run,
            stage,
            stage.percent(),
            label
        );
    }

    pub fn warn(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("ipin::pipeline")
    }
}
