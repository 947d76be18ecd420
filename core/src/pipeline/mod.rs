//! Simulated authentication pipeline driven by an injectable clock.

pub mod audio;
pub mod clock;
pub mod controller;
pub mod report;
pub mod stage;
pub mod timings;

pub use audio::{format_file_size, AudioDecoder, AudioInfo, WavDecoder};
pub use clock::{Clock, SystemClock, VirtualClock};
pub use controller::{PipelineController, PipelineEvent, Progress};
pub use report::{AuthVerdict, LesrReport, RunResults, SESSION_ATTEMPTS, SESSION_REQUIRED};
pub use stage::{PipelineStage, RunKind};
pub use timings::{PipelineTimings, ReprocessTimings, SampleTimings, UploadTimings};
