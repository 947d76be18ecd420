use super::audio::AudioInfo;
use crate::math::RandomSource;
use crate::synthetic::signal::generate_lesr_bands;
use ndarray::Array2;
use serde::Serialize;

/// Attempts in one authentication session.
pub const SESSION_ATTEMPTS: u32 = 5;
/// Successful attempts needed to pass the session.
pub const SESSION_REQUIRED: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LesrReport {
    pub snr_improvement_db: f64,
    pub noise_filtered: bool,
    pub replay_suspected: bool,
    /// Detection confidence in percent.
    pub confidence: f64,
    pub bands: Vec<f32>,
}

impl LesrReport {
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        Self {
            snr_improvement_db: rng.uniform(5.0, 10.0),
            noise_filtered: rng.chance(0.3),
            replay_suspected: !rng.chance(0.1),
            confidence: rng.uniform(90.0, 100.0),
            bands: generate_lesr_bands(rng),
        }
    }

    pub fn replay_label(&self) -> &'static str {
        if self.replay_suspected {
            "Replay suspected"
        } else {
            "No replay detected"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuthVerdict {
    pub similarity: f64,
    pub authenticated: bool,
    pub success_count: u32,
    pub session_passed: bool,
}

impl AuthVerdict {
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        let similarity = rng.uniform(0.6, 1.0);
        let success_count = SESSION_REQUIRED + (rng.next_unit() * 2.0).floor() as u32;
        Self {
            similarity,
            authenticated: similarity > 0.5,
            success_count,
            session_passed: success_count >= SESSION_REQUIRED,
        }
    }

    pub fn session_label(&self) -> String {
        format!("{}/{}", self.success_count, SESSION_ATTEMPTS)
    }
}

/// Everything a run has produced so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResults {
    pub audio: Option<AudioInfo>,
    pub lesr: Option<LesrReport>,
    pub features_ready: bool,
    pub verdict: Option<AuthVerdict>,
    #[serde(skip)]
    pub spectrogram: Option<Array2<f32>>,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FixedSequence;

    #[test]
    fn verdict_draws_from_unit_values() {
        let mut rng = FixedSequence::new(vec![0.5, 0.75]);
        let verdict = AuthVerdict::draw(&mut rng);
        assert!((verdict.similarity - 0.8).abs() < 1e-9);
        assert!(verdict.authenticated);
        assert_eq!(verdict.success_count, 4);
        assert!(verdict.session_passed);
        assert_eq!(verdict.session_label(), "4/5");
    }

    #[test]
    fn report_flags_follow_thresholds() {
        let mut rng = FixedSequence::new(vec![0.0, 0.2, 0.05, 0.5]);
        let report = LesrReport::draw(&mut rng);
        assert!((report.snr_improvement_db - 5.0).abs() < 1e-9);
        assert!(!report.noise_filtered);
        assert!(report.replay_suspected);
        assert!((report.confidence - 95.0).abs() < 1e-9);
        assert_eq!(report.replay_label(), "Replay suspected");
    }
}
