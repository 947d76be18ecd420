pub mod color;
pub mod random;
pub mod stats;

pub use color::Color;
pub use random::{EntropySource, FixedSequence, RandomSource};
pub use stats::StatsHelper;
