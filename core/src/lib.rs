//! Core of the I-PIN demonstration: synthetic datasets, chart rendering,
//! scenario tables and the simulated authentication pipeline.
//!
//! Nothing here processes real audio. Every figure is drawn from a random
//! source or a fixed table and painted through the [`render::Surface`]
//! abstraction, so the same charts can be replayed on a GUI canvas or
//! written out as SVG.

pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod render;
pub mod scenario;
pub mod synthetic;
pub mod telemetry;

pub use prelude::{DecodeError, PipelineError, PipelineResult};
