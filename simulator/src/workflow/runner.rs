use crate::workflow::config::DemoConfig;
use anyhow::Context;
use ipincore::math::EntropySource;
use ipincore::pipeline::{
    Clock, PipelineController, PipelineEvent, Progress, RunKind, RunResults, SystemClock,
};
use ipincore::telemetry::RunCounts;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub enum RunRequest {
    Sample(u32),
    Upload { path: PathBuf, reprocess: bool },
}

#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub trail: Vec<Progress>,
    pub completed: Vec<RunKind>,
    pub results: RunResults,
    pub counts: RunCounts,
}

/// Drives a pipeline controller against the tokio timer.
pub struct Runner<C: Clock> {
    pipeline: PipelineController<C>,
}

impl Runner<SystemClock> {
    pub fn new(config: &DemoConfig) -> Self {
        let rng = EntropySource::from_option(config.seed);
        Self::with_controller(PipelineController::new(
            SystemClock::new(),
            Box::new(rng),
            config.timings,
        ))
    }
}

impl<C: Clock> Runner<C> {
    pub fn with_controller(pipeline: PipelineController<C>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &PipelineController<C> {
        &self.pipeline
    }

    pub async fn execute(&mut self, request: &RunRequest) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();
        match request {
            RunRequest::Sample(sample) => {
                self.pipeline.load_sample(*sample);
                self.drive(&mut summary).await;
            }
            RunRequest::Upload { path, reprocess } => {
                self.pipeline
                    .process_path(path)
                    .with_context(|| format!("processing {}", path.display()))?;
                self.drive(&mut summary).await;
                if *reprocess {
                    self.pipeline.reprocess().context("reprocessing upload")?;
                    self.drive(&mut summary).await;
                }
            }
        }
        summary.results = self.pipeline.results().clone();
        summary.counts = self.pipeline.metrics().snapshot();
        Ok(summary)
    }

    async fn drive(&mut self, summary: &mut RunSummary) {
        loop {
            for event in self.pipeline.poll() {
                match event {
                    PipelineEvent::Progress(progress) => {
                        info!("{:>3}% {}", progress.percent, progress.label);
                        summary.trail.push(progress);
                    }
                    PipelineEvent::Completed(kind) => summary.completed.push(kind),
                }
            }
            let Some(wait) = self.pipeline.next_deadline() else {
                break;
            };
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipincore::pipeline::PipelineStage;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fast_config() -> DemoConfig {
        DemoConfig {
            seed: Some(11),
            timings: DemoConfig::default().timings.scaled(0.01),
            ..DemoConfig::default()
        }
    }

    fn wav_file() -> NamedTempFile {
        let temp = NamedTempFile::new().unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(temp.path(), spec).unwrap();
        for i in 0..800 {
            writer.write_sample((i % 64) as i16).unwrap();
        }
        writer.finalize().unwrap();
        temp
    }

    #[tokio::test]
    async fn sample_run_completes() {
        let mut runner = Runner::new(&fast_config());
        let summary = runner.execute(&RunRequest::Sample(1)).await.unwrap();
        assert_eq!(summary.completed, vec![RunKind::Sample(1)]);
        assert_eq!(summary.trail[0].label, "Loading sample audio 1...");
        assert_eq!(
            summary.trail.last().map(|p| p.stage),
            Some(PipelineStage::Authenticating)
        );
        let verdict = summary.results.verdict.unwrap();
        assert!(verdict.similarity >= 0.6 && verdict.similarity < 1.0);
        assert_eq!(summary.counts.completed, 1);
    }

    #[tokio::test]
    async fn upload_then_reprocess() {
        let file = wav_file();
        let mut runner = Runner::new(&fast_config());
        let request = RunRequest::Upload {
            path: file.path().to_path_buf(),
            reprocess: true,
        };
        let summary = runner.execute(&request).await.unwrap();
        assert_eq!(summary.completed, vec![RunKind::Upload, RunKind::Reprocess]);
        let audio = summary.results.audio.unwrap();
        assert_eq!(audio.sample_rate, 8_000);
        assert!((audio.duration_secs - 0.1).abs() < 1e-9);
        assert!(summary
            .trail
            .iter()
            .any(|p| p.stage == PipelineStage::Reprocessing));
        assert!(!runner.pipeline().is_busy());
    }

    #[tokio::test]
    async fn upload_trail_reports_every_stage() {
        let file = wav_file();
        let mut runner = Runner::new(&fast_config());
        let request = RunRequest::Upload {
            path: file.path().to_path_buf(),
            reprocess: false,
        };
        let summary = runner.execute(&request).await.unwrap();
        let percents: Vec<u8> = summary.trail.iter().map(|p| p.percent).collect();
        assert_eq!(percents, vec![20, 40, 60, 80, 100]);
        assert_eq!(summary.trail[0].label, "Loading audio file...");
        assert_eq!(summary.completed, vec![RunKind::Upload]);
    }

    #[tokio::test]
    async fn unreadable_upload_reports_failure() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"RIFF but not really").unwrap();
        let mut runner = Runner::new(&fast_config());
        let request = RunRequest::Upload {
            path: temp.path().to_path_buf(),
            reprocess: false,
        };
        assert!(runner.execute(&request).await.is_err());
        assert!(runner
            .pipeline()
            .error()
            .is_some_and(|e| e.starts_with("Audio processing failed")));
        assert_eq!(runner.pipeline().metrics().snapshot().failed, 1);
    }
}
