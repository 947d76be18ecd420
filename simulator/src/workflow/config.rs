use anyhow::{ensure, Context};
use ipincore::pipeline::PipelineTimings;
use ipincore::scenario::ScenarioId;
use ipincore::synthetic::subband::DEFAULT_BANDS;
use ipincore::synthetic::{GenerationParams, LesrMode, DEFAULT_USERS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub bands: usize,
    pub user_count: usize,
    pub lesr_mode: LesrMode,
    pub scenario: ScenarioId,
    /// Entropy-seeded when absent.
    pub seed: Option<u64>,
    pub timings: PipelineTimings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS,
            user_count: DEFAULT_USERS,
            lesr_mode: LesrMode::default(),
            scenario: ScenarioId::default(),
            seed: None,
            timings: PipelineTimings::default(),
        }
    }
}

impl DemoConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading demo config {}", path_ref.display()))?;
        let config: DemoConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing demo config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_args(
        bands: usize,
        user_count: usize,
        lesr_mode: LesrMode,
        scenario: ScenarioId,
        seed: Option<u64>,
    ) -> Self {
        Self {
            bands,
            user_count,
            lesr_mode,
            scenario,
            seed,
            timings: PipelineTimings::default(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.timings.is_monotonic(),
            "sample and reprocess timings must not decrease from one stage to the next"
        );
        Ok(())
    }

    /// Slider values clamped into range.
    pub fn params(&self) -> GenerationParams {
        GenerationParams::new(self.user_count, self.bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_clamps_params() {
        let cfg = DemoConfig::from_args(128, 1, LesrMode::Snr, ScenarioId::Attack, Some(4));
        let params = cfg.params();
        assert_eq!(params.band_count, 64);
        assert_eq!(params.user_count, 3);
        assert_eq!(cfg.timings, PipelineTimings::default());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"bands: 16\nlesr_mode: ratio\nscenario: cross-device\nseed: 9\ntimings:\n  sample:\n    analyze_ms: 50\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = DemoConfig::load(&path).unwrap();
        assert_eq!(cfg.bands, 16);
        assert_eq!(cfg.user_count, DEFAULT_USERS);
        assert_eq!(cfg.lesr_mode, LesrMode::Ratio);
        assert_eq!(cfg.scenario, ScenarioId::CrossDevice);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.timings.sample.analyze_ms, 50);
        assert_eq!(cfg.timings.sample.complete_ms, 3500);
    }

    #[test]
    fn config_load_rejects_backwards_timings() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"timings:\n  reprocess:\n    lesr_ms: 5000\n")
            .unwrap();
        let path = temp.into_temp_path();
        assert!(DemoConfig::load(&path).is_err());
    }
}
