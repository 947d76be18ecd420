//! Synthetic datasets behind every chart. Shapes are fixed, details random.

pub mod clusters;
pub mod gallery;
pub mod roc;
pub mod signal;
pub mod subband;

pub use clusters::{generate_clusters, ClusterPoint};
pub use roc::{generate_roc, PerformanceSummary, RocPoint, PERFORMANCE_SUMMARY};
pub use subband::{generate_sub_bands, LesrMode, SubBandMetrics};

use crate::math::RandomSource;
use log::debug;
use ndarray::Array2;
use serde::Serialize;
use std::collections::HashMap;

pub const MIN_USERS: usize = 3;
pub const MAX_USERS: usize = 10;
pub const DEFAULT_USERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatasetKind {
    Clusters,
    SubBands,
    Roc,
    Waveform,
    Spectrogram,
    Features,
    LesrBands,
    LiveSpectrogram,
    BandSnr,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 9] = [
        DatasetKind::Clusters,
        DatasetKind::SubBands,
        DatasetKind::Roc,
        DatasetKind::Waveform,
        DatasetKind::Spectrogram,
        DatasetKind::Features,
        DatasetKind::LesrBands,
        DatasetKind::LiveSpectrogram,
        DatasetKind::BandSnr,
    ];

    /// The parameter a dataset of this kind depends on, if any.
    fn cache_param(&self, params: &GenerationParams) -> usize {
        match self {
            DatasetKind::Clusters => params.user_count,
            DatasetKind::SubBands => params.band_count,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Dataset {
    Clusters(Vec<ClusterPoint>),
    SubBands(SubBandMetrics),
    Roc(Vec<RocPoint>),
    Waveform(Vec<f32>),
    Spectrogram(Array2<f32>),
    Features(Vec<f32>),
    LesrBands(Vec<f32>),
    LiveSpectrogram(Array2<f32>),
    BandSnr(Vec<f32>),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Clusters(_) => DatasetKind::Clusters,
            Dataset::SubBands(_) => DatasetKind::SubBands,
            Dataset::Roc(_) => DatasetKind::Roc,
            Dataset::Waveform(_) => DatasetKind::Waveform,
            Dataset::Spectrogram(_) => DatasetKind::Spectrogram,
            Dataset::Features(_) => DatasetKind::Features,
            Dataset::LesrBands(_) => DatasetKind::LesrBands,
            Dataset::LiveSpectrogram(_) => DatasetKind::LiveSpectrogram,
            Dataset::BandSnr(_) => DatasetKind::BandSnr,
        }
    }
}

/// Slider-driven generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub user_count: usize,
    pub band_count: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            user_count: DEFAULT_USERS,
            band_count: subband::DEFAULT_BANDS,
        }
    }
}

impl GenerationParams {
    pub fn new(user_count: usize, band_count: usize) -> Self {
        Self {
            user_count,
            band_count,
        }
        .normalized()
    }

    /// Clamps both parameters into their slider ranges.
    pub fn normalized(self) -> Self {
        Self {
            user_count: self.user_count.clamp(MIN_USERS, MAX_USERS),
            band_count: self
                .band_count
                .clamp(subband::MIN_BANDS, subband::MAX_BANDS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DatasetKey {
    kind: DatasetKind,
    param: usize,
}

/// Generates datasets on demand and keeps the latest one per
/// `(kind, parameter)` until invalidated.
pub struct SyntheticDataProvider {
    rng: Box<dyn RandomSource + Send>,
    cache: HashMap<DatasetKey, Dataset>,
}

impl SyntheticDataProvider {
    pub fn new(rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            rng,
            cache: HashMap::new(),
        }
    }

    /// Fresh dataset, bypassing the cache.
    pub fn generate(&mut self, kind: DatasetKind, params: GenerationParams) -> Dataset {
        let params = params.normalized();
        let rng = self.rng.as_mut();
        match kind {
            DatasetKind::Clusters => Dataset::Clusters(generate_clusters(params.user_count, rng)),
            DatasetKind::SubBands => {
                Dataset::SubBands(generate_sub_bands(params.band_count, rng))
            }
            DatasetKind::Roc => Dataset::Roc(generate_roc(rng)),
            DatasetKind::Waveform => Dataset::Waveform(signal::generate_waveform(rng)),
            DatasetKind::Spectrogram => Dataset::Spectrogram(signal::generate_spectrogram(rng)),
            DatasetKind::Features => Dataset::Features(signal::generate_features(rng)),
            DatasetKind::LesrBands => Dataset::LesrBands(signal::generate_lesr_bands(rng)),
            DatasetKind::LiveSpectrogram => {
                Dataset::LiveSpectrogram(signal::generate_live_spectrogram(rng))
            }
            DatasetKind::BandSnr => Dataset::BandSnr(signal::generate_band_snr(rng)),
        }
    }

    /// Cached dataset for `(kind, params)`, generated on first use.
    pub fn dataset(&mut self, kind: DatasetKind, params: GenerationParams) -> &Dataset {
        let params = params.normalized();
        let key = DatasetKey {
            kind,
            param: kind.cache_param(&params),
        };
        if !self.cache.contains_key(&key) {
            debug!("generating {:?} dataset (param {})", kind, key.param);
            let dataset = self.generate(kind, params);
            self.cache.insert(key, dataset);
        }
        &self.cache[&key]
    }

    /// Drops every cached dataset of `kind`.
    pub fn invalidate(&mut self, kind: DatasetKind) {
        self.cache.retain(|key, _| key.kind != kind);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EntropySource, FixedSequence};

    fn provider() -> SyntheticDataProvider {
        SyntheticDataProvider::new(Box::new(EntropySource::seeded(42)))
    }

    #[test]
    fn generate_matches_requested_kind() {
        let mut provider = provider();
        for kind in DatasetKind::ALL {
            let dataset = provider.generate(kind, GenerationParams::default());
            assert_eq!(dataset.kind(), kind);
        }
    }

    #[test]
    fn cached_dataset_is_reused_until_invalidated() {
        let mut provider = provider();
        let params = GenerationParams::default();
        let first = provider.dataset(DatasetKind::Roc, params).clone();
        let second = provider.dataset(DatasetKind::Roc, params).clone();
        assert_eq!(first, second);

        provider.invalidate(DatasetKind::Roc);
        let third = provider.dataset(DatasetKind::Roc, params).clone();
        assert_ne!(first, third);
    }

    #[test]
    fn cache_is_keyed_by_relevant_parameter() {
        let mut provider = SyntheticDataProvider::new(Box::new(FixedSequence::constant(0.5)));
        let four = provider.dataset(DatasetKind::Clusters, GenerationParams::new(4, 32));
        assert!(matches!(four, Dataset::Clusters(points) if points.len() == 200));
        let seven = provider.dataset(DatasetKind::Clusters, GenerationParams::new(7, 32));
        assert!(matches!(seven, Dataset::Clusters(points) if points.len() == 350));
    }

    #[test]
    fn params_are_clamped_to_slider_ranges() {
        let params = GenerationParams::new(1, 500);
        assert_eq!(params.user_count, MIN_USERS);
        assert_eq!(params.band_count, subband::MAX_BANDS);
    }
}
