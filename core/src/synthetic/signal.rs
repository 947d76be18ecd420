use crate::math::RandomSource;
use ndarray::Array2;
use std::f64::consts::PI;

pub const WAVEFORM_SAMPLES: usize = 1000;
pub const SPECTROGRAM_TIME_STEPS: usize = 100;
pub const SPECTROGRAM_FREQ_BINS: usize = 80;
pub const FEATURE_DIMENSIONS: usize = 512;
pub const LESR_DISPLAY_BANDS: usize = 32;
pub const LIVE_TIME_STEPS: usize = 80;
pub const LIVE_FREQ_BINS: usize = 60;
pub const BAND_SNR_BANDS: usize = 16;
pub const BAND_SNR_MAX: f32 = 12.0;

/// 10 Hz sinusoid with `exp(-2t)` decay plus `[-0.05, 0.05)` noise.
pub fn generate_waveform(rng: &mut dyn RandomSource) -> Vec<f32> {
    (0..WAVEFORM_SAMPLES)
        .map(|i| {
            let t = i as f64 / WAVEFORM_SAMPLES as f64;
            let signal = (2.0 * PI * 10.0 * t).sin() * (-t * 2.0).exp();
            let noise = (rng.next_unit() - 0.5) * 0.1;
            (signal + noise) as f32
        })
        .collect()
}

/// Time x frequency intensity grid with a low band, a mid band and a louder
/// mid-time window.
pub fn generate_spectrogram(rng: &mut dyn RandomSource) -> Array2<f32> {
    Array2::from_shape_fn(
        (SPECTROGRAM_TIME_STEPS, SPECTROGRAM_FREQ_BINS),
        |(t, f)| {
            let mut intensity = rng.next_unit() * 0.3;
            if f < 10 {
                intensity += rng.next_unit() * 0.4;
            }
            if f > 30 && f < 50 {
                intensity += rng.next_unit() * 0.6;
            }
            if t > 20 && t < 60 {
                intensity *= 1.5;
            }
            intensity.min(1.0) as f32
        },
    )
}

pub fn generate_features(rng: &mut dyn RandomSource) -> Vec<f32> {
    (0..FEATURE_DIMENSIONS)
        .map(|_| rng.uniform(-1.0, 1.0) as f32)
        .collect()
}

/// Band intensities shown after the LESR step of a pipeline run, `[0.2, 1.0)`.
pub fn generate_lesr_bands(rng: &mut dyn RandomSource) -> Vec<f32> {
    (0..LESR_DISPLAY_BANDS)
        .map(|_| rng.uniform(0.2, 1.0) as f32)
        .collect()
}

/// Smaller spectrogram painted at the end of a pipeline run.
pub fn generate_live_spectrogram(rng: &mut dyn RandomSource) -> Array2<f32> {
    Array2::from_shape_fn((LIVE_TIME_STEPS, LIVE_FREQ_BINS), |(_, f)| {
        let mut intensity = rng.next_unit() * 0.5;
        if f < 10 {
            intensity += rng.next_unit() * 0.3;
        }
        if f > 40 && f < 50 {
            intensity += rng.next_unit() * 0.4;
        }
        intensity.min(1.0) as f32
    })
}

/// SNR improvement per band for the parameter-analysis page, in dB.
pub fn generate_band_snr(rng: &mut dyn RandomSource) -> Vec<f32> {
    (0..BAND_SNR_BANDS)
        .map(|i| (3.0 + (i as f64 * 0.5).sin() * 4.0 + rng.next_unit() * 2.0) as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EntropySource, FixedSequence};

    #[test]
    fn waveform_decays() {
        let mut rng = FixedSequence::constant(0.5);
        let wave = generate_waveform(&mut rng);
        assert_eq!(wave.len(), WAVEFORM_SAMPLES);
        let head = wave[..100].iter().cloned().fold(0.0f32, |a, v| a.max(v.abs()));
        let tail = wave[900..].iter().cloned().fold(0.0f32, |a, v| a.max(v.abs()));
        assert!(head > tail);
    }

    #[test]
    fn spectrogram_bands_and_window() {
        let mut rng = FixedSequence::constant(0.5);
        let grid = generate_spectrogram(&mut rng);
        assert_eq!(grid.dim(), (SPECTROGRAM_TIME_STEPS, SPECTROGRAM_FREQ_BINS));
        assert!((grid[[0, 20]] - 0.15).abs() < 1e-6);
        assert!((grid[[0, 5]] - 0.35).abs() < 1e-6);
        assert!((grid[[0, 40]] - 0.45).abs() < 1e-6);
        assert!((grid[[30, 20]] - 0.225).abs() < 1e-6);
        assert!((grid[[30, 40]] - 0.675).abs() < 1e-6);
        assert!(grid.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn features_within_unit_range() {
        let mut rng = EntropySource::seeded(9);
        let features = generate_features(&mut rng);
        assert_eq!(features.len(), FEATURE_DIMENSIONS);
        assert!(features.iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn demo_series_shapes() {
        let mut rng = EntropySource::seeded(2);
        let bands = generate_lesr_bands(&mut rng);
        assert_eq!(bands.len(), LESR_DISPLAY_BANDS);
        assert!(bands.iter().all(|v| (0.2..1.0).contains(v)));
        let live = generate_live_spectrogram(&mut rng);
        assert_eq!(live.dim(), (LIVE_TIME_STEPS, LIVE_FREQ_BINS));
        let snr = generate_band_snr(&mut rng);
        assert_eq!(snr.len(), BAND_SNR_BANDS);
        assert!(snr.iter().all(|v| *v < BAND_SNR_MAX));
    }
}
