pub use crate::math::{EntropySource, FixedSequence, RandomSource};
pub use crate::pipeline::{Clock, PipelineController, PipelineStage, SystemClock, VirtualClock};
pub use crate::render::{ChartKind, ChartRenderer, DrawList, Surface};
pub use crate::synthetic::{Dataset, DatasetKind, GenerationParams, SyntheticDataProvider};

/// Audio could not be read or decoded; the only failure the demo knows.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("file is empty")]
    Empty,
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("unsupported or malformed audio: {0}")]
    Format(#[from] hound::Error),
    #[error("invalid stream parameters: {0}")]
    Invalid(String),
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("a file is already being processed")]
    Busy,
    #[error("Please upload an audio file first")]
    NoAudioLoaded,
    #[error("Audio processing failed: {0}")]
    Decode(#[from] DecodeError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
