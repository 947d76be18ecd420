use crate::workflow::config::DemoConfig;
use anyhow::Context;
use ipincore::math::EntropySource;
use ipincore::render::{to_svg, ChartKind, ChartRenderer};
use ipincore::scenario::ScenarioPresenter;
use ipincore::synthetic::SyntheticDataProvider;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct ChartFile {
    name: String,
    kind: ChartKind,
}

fn chart(name: &str, kind: ChartKind) -> ChartFile {
    ChartFile {
        name: name.to_string(),
        kind,
    }
}

fn chart_plan(config: &DemoConfig) -> Vec<ChartFile> {
    vec![
        chart("clusters", ChartKind::Clusters),
        chart(
            &format!("sub-bands-{}", config.lesr_mode),
            ChartKind::SubBands(config.lesr_mode),
        ),
        chart("snr-improvement", ChartKind::SnrImprovement),
        chart("roc", ChartKind::Roc),
        chart("performance", ChartKind::PerformanceBars),
        chart("ablation", ChartKind::Ablation),
        chart("waveform", ChartKind::Waveform),
        chart("spectrogram", ChartKind::Spectrogram),
        chart("feature-map", ChartKind::FeatureMap),
        chart("threshold-sweep", ChartKind::ThresholdSweep),
        chart("mofn", ChartKind::MofN),
        chart("band-sweep", ChartKind::BandSweep),
        chart("band-snr", ChartKind::BandSnr),
        chart("lesr-bands", ChartKind::LesrBands),
        chart("feature-space", ChartKind::FeatureSpace),
        chart("live-spectrogram", ChartKind::LiveSpectrogram),
    ]
}

/// Writes every chart plus the configured scenario's cards as SVG files
/// under `dir` and returns the paths written.
pub fn export_all(config: &DemoConfig, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let params = config.params();
    let mut provider = SyntheticDataProvider::new(Box::new(EntropySource::from_option(config.seed)));
    let mut paint_rng = EntropySource::from_option(config.seed.map(|seed| seed.wrapping_add(1)));
    let renderer = Arc::new(ChartRenderer::new());
    let mut written = Vec::new();

    for file in chart_plan(config) {
        let dataset = file
            .kind
            .dataset_kind()
            .map(|kind| provider.dataset(kind, params));
        let list = renderer.render_native(file.kind, dataset, &mut paint_rng);
        let path = dir.join(format!("{}.svg", file.name));
        fs::write(&path, to_svg(&list)).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    let mut presenter = ScenarioPresenter::new(Arc::clone(&renderer));
    let grid = presenter.select(config.scenario.key(), &mut paint_rng);
    if grid.cards.is_empty() {
        warn!("scenario {} produced no cards", config.scenario);
    }
    for (index, card) in grid.cards.iter().enumerate() {
        let path = dir.join(format!("scenario-{}-{}.svg", config.scenario.key(), index + 1));
        fs::write(&path, to_svg(&card.drawing))
            .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    info!("exported {} svg files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipincore::scenario::ScenarioId;

    #[test]
    fn exports_charts_and_cards() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig {
            seed: Some(5),
            scenario: ScenarioId::Noisy,
            ..DemoConfig::default()
        };
        let written = export_all(&config, dir.path()).unwrap();
        assert_eq!(written.len(), chart_plan(&config).len() + 6);
        assert!(dir.path().join("sub-bands-energy.svg").exists());
        assert!(dir.path().join("scenario-noisy-6.svg").exists());
        let clusters = fs::read_to_string(dir.path().join("clusters.svg")).unwrap();
        assert!(clusters.contains("width=\"800\" height=\"600\""));
        let ablation = fs::read_to_string(dir.path().join("ablation.svg")).unwrap();
        assert!(ablation.contains("width=\"600\" height=\"400\""));
        for path in &written {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.starts_with("<svg"), "{}", path.display());
            assert!(svg.trim_end().ends_with("</svg>"));
        }
    }

    #[test]
    fn seeded_exports_repeat() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let config = DemoConfig {
            seed: Some(21),
            ..DemoConfig::default()
        };
        export_all(&config, first.path()).unwrap();
        export_all(&config, second.path()).unwrap();
        let read = |dir: &Path| fs::read_to_string(dir.join("clusters.svg")).unwrap();
        assert_eq!(read(first.path()), read(second.path()));
    }
}
