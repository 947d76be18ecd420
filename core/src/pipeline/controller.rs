use super::audio::{AudioDecoder, AudioInfo, WavDecoder};
use super::clock::Clock;
use super::report::{AuthVerdict, LesrReport, RunResults};
use super::stage::{PipelineStage, RunKind};
use super::timings::{ms, PipelineTimings};
use crate::math::RandomSource;
use crate::prelude::{DecodeError, PipelineError, PipelineResult};
use crate::synthetic::signal::generate_live_spectrogram;
use crate::telemetry::{LogManager, MetricsRecorder};
use serde::Serialize;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub stage: PipelineStage,
    pub percent: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PipelineEvent {
    Progress(Progress),
    Completed(RunKind),
}

enum Step {
    Describe(AudioInfo),
    Enter(PipelineStage),
    Complete,
}

struct Scheduled {
    at: Duration,
    step: Step,
}

struct ActiveRun {
    id: u64,
    kind: RunKind,
    steps: VecDeque<Scheduled>,
}

/// Timed state machine behind the interactive demo.
///
/// Runs are advanced by [`poll`](Self::poll) against the injected clock;
/// the controller never sleeps. Stages entered synchronously by a start call
/// are queued and reported by the next `poll`, so callers see every step. Only one run exists at a time: starting a
/// sample or reprocess run replaces whatever was in flight, while an upload
/// is refused with [`PipelineError::Busy`] as long as another upload holds
/// the busy flag.
pub struct PipelineController<C: Clock> {
    clock: C,
    rng: Box<dyn RandomSource + Send>,
    decoder: Box<dyn AudioDecoder + Send>,
    timings: PipelineTimings,
    stage: PipelineStage,
    label: String,
    busy: bool,
    run: Option<ActiveRun>,
    pending: Vec<PipelineEvent>,
    next_run_id: u64,
    audio: Option<AudioInfo>,
    results: RunResults,
    last_error: Option<String>,
    log: LogManager,
    metrics: MetricsRecorder,
}

impl<C: Clock> PipelineController<C> {
    pub fn new(clock: C, rng: Box<dyn RandomSource + Send>, timings: PipelineTimings) -> Self {
        Self {
            clock,
            rng,
            decoder: Box::new(WavDecoder),
            timings,
            stage: PipelineStage::Idle,
            label: PipelineStage::Idle.label().to_string(),
            busy: false,
            run: None,
            pending: Vec::new(),
            next_run_id: 1,
            audio: None,
            results: RunResults::default(),
            last_error: None,
            log: LogManager::default(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn with_decoder(mut self, decoder: Box<dyn AudioDecoder + Send>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Upload path: decode `bytes`, then walk LESR, features and authentication.
    pub fn process_file(&mut self, bytes: &[u8]) -> PipelineResult<AudioInfo> {
        self.guard_upload()?;
        self.begin(
            RunKind::Upload,
            PipelineStage::Loading,
            PipelineStage::Loading.label().to_string(),
        );
        self.decode_upload(bytes)
    }

    /// Same as [`process_file`](Self::process_file), reading from disk first.
    pub fn process_path(&mut self, path: impl AsRef<Path>) -> PipelineResult<AudioInfo> {
        self.guard_upload()?;
        self.begin(
            RunKind::Upload,
            PipelineStage::Loading,
            PipelineStage::Loading.label().to_string(),
        );
        match std::fs::read(path.as_ref()) {
            Ok(bytes) => self.decode_upload(&bytes),
            Err(err) => Err(self.fail(DecodeError::from(err))),
        }
    }

    /// Scripted run for one of the bundled samples. Never decodes anything.
    pub fn load_sample(&mut self, sample: u32) {
        self.begin(
            RunKind::Sample(sample),
            PipelineStage::Loading,
            format!("Loading sample audio {}...", sample),
        );
        let t = self.timings.sample;
        let start = self.clock.now();
        self.schedule(start + ms(t.analyze_ms), Step::Describe(AudioInfo::SAMPLE));
        self.schedule(start + ms(t.analyze_ms), Step::Enter(PipelineStage::Analyzing));
        self.schedule(start + ms(t.lesr_ms), Step::Enter(PipelineStage::Lesr));
        self.schedule(
            start + ms(t.feature_ms),
            Step::Enter(PipelineStage::FeatureExtraction),
        );
        self.schedule(start + ms(t.auth_ms), Step::Enter(PipelineStage::Authenticating));
        self.schedule(start + ms(t.complete_ms), Step::Complete);
    }

    /// Re-run the analysis on the last decoded upload.
    pub fn reprocess(&mut self) -> PipelineResult<()> {
        let Some(audio) = self.audio else {
            let err = PipelineError::NoAudioLoaded;
            self.last_error = Some(err.to_string());
            self.log.warn("reprocess requested with no decoded audio");
            return Err(err);
        };
        self.begin(
            RunKind::Reprocess,
            PipelineStage::Reprocessing,
            PipelineStage::Reprocessing.label().to_string(),
        );
        self.results.audio = Some(audio);
        let t = self.timings.reprocess;
        let start = self.clock.now();
        self.schedule(start + ms(t.lesr_ms), Step::Enter(PipelineStage::Lesr));
        self.schedule(
            start + ms(t.feature_ms),
            Step::Enter(PipelineStage::FeatureExtraction),
        );
        self.schedule(start + ms(t.auth_ms), Step::Enter(PipelineStage::Authenticating));
        self.schedule(start + ms(t.complete_ms), Step::Complete);
        Ok(())
    }

    /// Apply every step whose time has come, in schedule order.
    pub fn poll(&mut self) -> Vec<PipelineEvent> {
        let now = self.clock.now();
        let mut events = std::mem::take(&mut self.pending);
        loop {
            let Some(run) = self.run.as_mut() else {
                break;
            };
            if !run.steps.front().map_or(false, |s| s.at <= now) {
                break;
            }
            let Some(scheduled) = run.steps.pop_front() else {
                break;
            };
            match scheduled.step {
                Step::Describe(info) => self.results.audio = Some(info),
                Step::Enter(stage) => {
                    self.enter(stage);
                    events.push(PipelineEvent::Progress(self.progress()));
                }
                Step::Complete => {
                    if let Some(kind) = self.complete() {
                        events.push(PipelineEvent::Completed(kind));
                    }
                }
            }
        }
        events
    }

    /// Time left until the next scheduled step, if a run is active.
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.run
            .as_ref()
            .and_then(|run| run.steps.front())
            .map(|s| s.at.saturating_sub(now))
    }

    pub fn progress(&self) -> Progress {
        Progress {
            stage: self.stage,
            percent: self.stage.percent(),
            label: self.label.clone(),
        }
    }

    /// Drop the active run without counting it as preempted.
    pub fn reset(&mut self) {
        if let Some(run) = self.run.take() {
            self.log.record(&format!("run {} cancelled", run.id));
        }
        self.pending.clear();
        self.busy = false;
        self.set_idle();
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn active_kind(&self) -> Option<RunKind> {
        self.run.as_ref().map(|run| run.kind)
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn results(&self) -> &RunResults {
        &self.results
    }

    /// Last successfully decoded upload.
    pub fn audio(&self) -> Option<&AudioInfo> {
        self.audio.as_ref()
    }

    pub fn timings(&self) -> &PipelineTimings {
        &self.timings
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    fn guard_upload(&mut self) -> PipelineResult<()> {
        if self.busy {
            self.metrics.record_rejected();
            self.log.warn("upload rejected: another file is being processed");
            return Err(PipelineError::Busy);
        }
        Ok(())
    }

    fn begin(&mut self, kind: RunKind, stage: PipelineStage, label: String) {
        if let Some(previous) = self.run.take() {
            self.metrics.record_preempted();
            self.log.warn(&format!(
                "run {} ({:?}) preempted by {:?}",
                previous.id, previous.kind, kind
            ));
        }
        let id = self.next_run_id;
        self.next_run_id += 1;
        self.run = Some(ActiveRun {
            id,
            kind,
            steps: VecDeque::new(),
        });
        self.busy = kind == RunKind::Upload;
        self.results = RunResults::default();
        self.last_error = None;
        self.stage = stage;
        self.label = label;
        self.log.stage(id, self.stage, &self.label);
        self.pending.clear();
        self.announce();
    }

    fn decode_upload(&mut self, bytes: &[u8]) -> PipelineResult<AudioInfo> {
        let info = match self.decoder.decode(bytes) {
            Ok(info) => info,
            Err(err) => return Err(self.fail(err)),
        };
        self.audio = Some(info);
        self.results.audio = Some(info);
        self.enter(PipelineStage::Analyzing);
        self.announce();
        self.enter(PipelineStage::Lesr);
        self.announce();

        let t = self.timings.upload;
        let feature_at = self.clock.now() + ms(t.lesr_ms);
        let auth_at = feature_at + ms(t.feature_ms);
        let done_at = auth_at + ms(t.auth_ms);
        self.schedule(feature_at, Step::Enter(PipelineStage::FeatureExtraction));
        self.schedule(auth_at, Step::Enter(PipelineStage::Authenticating));
        self.schedule(done_at, Step::Complete);
        Ok(info)
    }

    fn fail(&mut self, err: DecodeError) -> PipelineError {
        let err = PipelineError::from(err);
        let message = err.to_string();
        if let Some(run) = self.run.take() {
            self.log.warn(&format!("run {} failed: {}", run.id, message));
        }
        self.metrics.record_failed();
        self.last_error = Some(message);
        self.busy = false;
        self.set_idle();
        err
    }

    fn announce(&mut self) {
        self.pending.push(PipelineEvent::Progress(self.progress()));
    }

    fn schedule(&mut self, at: Duration, step: Step) {
        if let Some(run) = self.run.as_mut() {
            run.steps.push_back(Scheduled { at, step });
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        self.stage = stage;
        self.label = stage.label().to_string();
        let id = self.run.as_ref().map_or(0, |run| run.id);
        self.log.stage(id, stage, &self.label);
        match stage {
            PipelineStage::FeatureExtraction => {
                self.results.lesr = Some(LesrReport::draw(self.rng.as_mut()));
            }
            PipelineStage::Authenticating => {
                self.results.features_ready = true;
                self.results.verdict = Some(AuthVerdict::draw(self.rng.as_mut()));
            }
            _ => {}
        }
    }

    fn complete(&mut self) -> Option<RunKind> {
        let run = self.run.take()?;
        self.results.spectrogram = Some(generate_live_spectrogram(self.rng.as_mut()));
        self.results.completed = true;
        self.busy = false;
        self.set_idle();
        self.metrics.record_completed();
        self.log
            .record(&format!("run {} ({:?}) complete", run.id, run.kind));
        Some(run.kind)
    }

    fn set_idle(&mut self) {
        self.stage = PipelineStage::Idle;
        self.label = PipelineStage::Idle.label().to_string();
    }
}
