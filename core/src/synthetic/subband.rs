use crate::math::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_BANDS: usize = 8;
pub const MAX_BANDS: usize = 64;
pub const DEFAULT_BANDS: usize = 32;

/// Which sub-band series the band chart displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LesrMode {
    #[default]
    Energy,
    Ratio,
    Snr,
}

impl LesrMode {
    pub const ALL: [LesrMode; 3] = [LesrMode::Energy, LesrMode::Ratio, LesrMode::Snr];

    pub fn title(&self) -> &'static str {
        match self {
            LesrMode::Energy => "LESR energy distribution",
            LesrMode::Ratio => "LESR ratio analysis",
            LesrMode::Snr => "SNR improvement",
        }
    }
}

impl fmt::Display for LesrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LesrMode::Energy => "energy",
            LesrMode::Ratio => "ratio",
            LesrMode::Snr => "snr",
        };
        f.write_str(label)
    }
}

impl FromStr for LesrMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LesrMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown LESR mode {:?} (energy, ratio, snr)", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubBandMetrics {
    pub energy: Vec<f32>,
    pub ratio: Vec<f32>,
    /// Per-band SNR improvement in dB, `[5, 15)`.
    pub snr: Vec<f32>,
}

impl SubBandMetrics {
    pub fn band_count(&self) -> usize {
        self.energy.len()
    }

    pub fn series(&self, mode: LesrMode) -> &[f32] {
        match mode {
            LesrMode::Energy => &self.energy,
            LesrMode::Ratio => &self.ratio,
            LesrMode::Snr => &self.snr,
        }
    }
}

fn bump(freq: f64, center: f64, width: f64) -> f64 {
    (-(freq - center).powi(2) / width).exp()
}

pub fn generate_sub_bands(band_count: usize, rng: &mut dyn RandomSource) -> SubBandMetrics {
    let mut metrics = SubBandMetrics {
        energy: Vec::with_capacity(band_count),
        ratio: Vec::with_capacity(band_count),
        snr: Vec::with_capacity(band_count),
    };

    for band in 0..band_count {
        let freq = band as f64 / band_count as f64;
        let energy = bump(freq, 0.3, 0.1) * 0.8 + bump(freq, 0.7, 0.05) * 0.6 + rng.next_unit() * 0.2;
        metrics.energy.push(energy as f32);
        metrics
            .ratio
            .push(((energy + 0.1).ln() - 0.5f64.ln()) as f32);
        metrics.snr.push(rng.uniform(5.0, 15.0) as f32);
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EntropySource, FixedSequence};

    #[test]
    fn every_series_matches_band_count() {
        let mut rng = EntropySource::seeded(5);
        for bands in MIN_BANDS..=MAX_BANDS {
            let metrics = generate_sub_bands(bands, &mut rng);
            assert_eq!(metrics.band_count(), bands);
            assert_eq!(metrics.ratio.len(), bands);
            assert_eq!(metrics.snr.len(), bands);
            assert!(metrics.snr.iter().all(|v| (5.0..15.0).contains(v)));
        }
    }

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!("SNR".parse::<LesrMode>(), Ok(LesrMode::Snr));
        assert_eq!(" ratio ".parse::<LesrMode>(), Ok(LesrMode::Ratio));
        assert!("power".parse::<LesrMode>().is_err());
    }

    #[test]
    fn ratio_is_log_odds_of_energy() {
        let mut rng = FixedSequence::constant(0.0);
        let metrics = generate_sub_bands(16, &mut rng);
        for (energy, ratio) in metrics.energy.iter().zip(&metrics.ratio) {
            let expected = (energy + 0.1).ln() - 0.5f32.ln();
            assert!((ratio - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn energy_peaks_near_lower_bump() {
        let mut rng = FixedSequence::constant(0.0);
        let metrics = generate_sub_bands(10, &mut rng);
        let peak = metrics
            .energy
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 3);
    }
}
