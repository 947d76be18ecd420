//! Fixed scenario result tables and the card grid presented for each.

pub mod table;

pub use table::{Scenario, ScenarioId, ScenarioMetric};

use crate::math::RandomSource;
use crate::render::{ChartKind, ChartRenderer, DrawList, Surface, CARD_SIZE};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

pub const CARD_WIDTH: f32 = CARD_SIZE.width;
pub const CARD_HEIGHT: f32 = CARD_SIZE.height;

/// Metric title to embedded chart; exact match.
const CARD_CHARTS: [(&str, ChartKind); 13] = [
    ("F1 Score", ChartKind::Line),
    ("1-EER", ChartKind::Line),
    ("ASR", ChartKind::Bar),
    ("FPR", ChartKind::Bar),
    ("Processing Time", ChartKind::Gauge),
    ("Memory Usage", ChartKind::Gauge),
    ("SNR Gain", ChartKind::Wave),
    ("Replay Detection", ChartKind::Shield),
    ("Shoulder-Surfing Protection", ChartKind::Shield),
    ("Device Adaptability", ChartKind::DeviceRow),
    ("Hardware Compatibility", ChartKind::DeviceRow),
    ("Short-term Stability", ChartKind::Stability),
    ("Long-term Stability", ChartKind::Stability),
];

pub fn chart_for_metric(title: &str) -> ChartKind {
    CARD_CHARTS
        .iter()
        .find(|(name, _)| *name == title)
        .map(|(_, kind)| *kind)
        .unwrap_or(ChartKind::Scatter)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub title: &'static str,
    pub value: &'static str,
    pub description: &'static str,
    pub chart: ChartKind,
    pub drawing: DrawList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedGrid {
    /// `None` when the requested id did not name a scenario.
    pub scenario: Option<ScenarioId>,
    pub cards: Vec<RenderedCard>,
}

impl RenderedGrid {
    pub fn empty() -> Self {
        Self {
            scenario: None,
            cards: Vec::new(),
        }
    }
}

/// Holds the active scenario and renders its result cards.
pub struct ScenarioPresenter {
    active: ScenarioId,
    renderer: Arc<ChartRenderer>,
}

impl ScenarioPresenter {
    pub fn new(renderer: Arc<ChartRenderer>) -> Self {
        Self {
            active: ScenarioId::default(),
            renderer,
        }
    }

    pub fn active(&self) -> ScenarioId {
        self.active
    }

    /// Switches to `id` and renders its grid. Unknown ids leave the active
    /// scenario untouched and yield an empty grid.
    pub fn select(&mut self, id: &str, rng: &mut dyn RandomSource) -> RenderedGrid {
        match ScenarioId::parse(id) {
            Some(scenario) => {
                info!("presenting scenario {}", scenario.key());
                self.active = scenario;
                self.present(scenario, rng)
            }
            None => {
                warn!("unknown scenario id {:?}", id);
                RenderedGrid::empty()
            }
        }
    }

    /// Re-renders the active scenario.
    pub fn refresh(&self, rng: &mut dyn RandomSource) -> RenderedGrid {
        self.present(self.active, rng)
    }

    fn present(&self, id: ScenarioId, rng: &mut dyn RandomSource) -> RenderedGrid {
        // Every card surface exists before the first chart is drawn.
        let mut cards: Vec<RenderedCard> = id
            .scenario()
            .metrics
            .iter()
            .map(|metric| RenderedCard {
                title: metric.title,
                value: metric.value,
                description: metric.description,
                chart: chart_for_metric(metric.title),
                drawing: DrawList::new(CARD_WIDTH, CARD_HEIGHT),
            })
            .collect();

        for card in &mut cards {
            let surface: &mut dyn Surface = &mut card.drawing;
            self.renderer.render(surface, card.chart, None, rng);
        }

        RenderedGrid {
            scenario: Some(id),
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EntropySource;
    use crate::render::{DrawOp, Shape};

    fn presenter() -> ScenarioPresenter {
        ScenarioPresenter::new(Arc::new(ChartRenderer::new()))
    }

    #[test]
    fn clean_scenario_has_six_literal_cards() {
        let mut presenter = presenter();
        let mut rng = EntropySource::seeded(1);
        let grid = presenter.select("clean", &mut rng);
        let values: Vec<_> = grid.cards.iter().map(|c| (c.title, c.value)).collect();
        assert_eq!(
            values,
            vec![
                ("F1 Score", "0.999"),
                ("1-EER", "0.999"),
                ("ASR", "95.2%"),
                ("FPR", "2.1%"),
                ("Processing Time", "23ms"),
                ("Memory Usage", "12MB"),
            ]
        );
        assert!(grid.cards.iter().all(|c| !c.drawing.is_empty()));
    }

    #[test]
    fn unknown_scenario_does_not_panic_or_switch() {
        let mut presenter = presenter();
        let mut rng = EntropySource::seeded(1);
        presenter.select("attack", &mut rng);
        let grid = presenter.select("no-such-scenario", &mut rng);
        assert!(grid.cards.is_empty());
        assert_eq!(grid.scenario, None);
        assert_eq!(presenter.active(), ScenarioId::Attack);
    }

    #[test]
    fn chart_lookup_is_exact() {
        assert_eq!(chart_for_metric("ASR"), ChartKind::Bar);
        assert_eq!(chart_for_metric("SNR Gain"), ChartKind::Wave);
        assert_eq!(chart_for_metric("asr"), ChartKind::Scatter);
        assert_eq!(chart_for_metric("Robustness"), ChartKind::Scatter);
    }

    #[test]
    fn every_scenario_renders_six_cards() {
        let mut presenter = presenter();
        let mut rng = EntropySource::seeded(9);
        for id in ScenarioId::ALL {
            let grid = presenter.select(id.key(), &mut rng);
            assert_eq!(grid.scenario, Some(id));
            assert_eq!(grid.cards.len(), 6);
        }
    }

    #[test]
    fn cards_start_with_background() {
        let mut rng = EntropySource::seeded(2);
        let grid = presenter().refresh(&mut rng);
        for card in &grid.cards {
            assert!(matches!(
                card.drawing.ops().first(),
                Some(DrawOp::Fill(Shape::Rect { .. }, _))
            ));
        }
    }
}
