//! Chart rendering onto abstract 2D surfaces.
//!
//! Every chart kind is a strategy registered in [`ChartRenderer`]; the
//! renderer clears the surface to the chart's background and dispatches by
//! tag. Kinds that need data fall back to the scatter chart when the dataset
//! is missing or of the wrong shape.

pub mod analysis;
pub mod cards;
pub mod charts;
pub mod surface;
pub mod svg;

pub use charts::render_placeholder;
pub use surface::{
    DrawList, DrawOp, Label, Paint, Point, Shape, Size, StrokeStyle, Surface, TextAlign,
};
pub use svg::to_svg;

use crate::math::{Color, RandomSource};
use crate::synthetic::{Dataset, DatasetKind, LesrMode};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
    Gauge,
    Wave,
    Shield,
    DeviceRow,
    Stability,
    Scatter,
    Clusters,
    SubBands(LesrMode),
    SnrImprovement,
    Roc,
    PerformanceBars,
    Ablation,
    Waveform,
    Spectrogram,
    FeatureMap,
    ThresholdSweep,
    MofN,
    BandSweep,
    BandSnr,
    LesrBands,
    FeatureSpace,
    LiveSpectrogram,
}

/// Scenario card canvas.
pub const CARD_SIZE: Size = Size::new(300.0, 180.0);

impl ChartKind {
    pub const ALL: [ChartKind; 26] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Gauge,
        ChartKind::Wave,
        ChartKind::Shield,
        ChartKind::DeviceRow,
        ChartKind::Stability,
        ChartKind::Scatter,
        ChartKind::Clusters,
        ChartKind::SubBands(LesrMode::Energy),
        ChartKind::SubBands(LesrMode::Ratio),
        ChartKind::SubBands(LesrMode::Snr),
        ChartKind::SnrImprovement,
        ChartKind::Roc,
        ChartKind::PerformanceBars,
        ChartKind::Ablation,
        ChartKind::Waveform,
        ChartKind::Spectrogram,
        ChartKind::FeatureMap,
        ChartKind::ThresholdSweep,
        ChartKind::MofN,
        ChartKind::BandSweep,
        ChartKind::BandSnr,
        ChartKind::LesrBands,
        ChartKind::FeatureSpace,
        ChartKind::LiveSpectrogram,
    ];

    /// Canvas the chart's fixed pixel layout is drawn for. Clusters sit on a
    /// ring around (400, 300) and the metric bars start at fixed offsets, so
    /// smaller canvases clip them.
    pub fn native_size(&self) -> Size {
        match self {
            ChartKind::Line
            | ChartKind::Bar
            | ChartKind::Gauge
            | ChartKind::Wave
            | ChartKind::Shield
            | ChartKind::DeviceRow
            | ChartKind::Stability
            | ChartKind::Scatter => CARD_SIZE,
            ChartKind::Clusters => Size::new(800.0, 600.0),
            ChartKind::SubBands(_) | ChartKind::SnrImprovement => Size::new(800.0, 400.0),
            ChartKind::Roc | ChartKind::PerformanceBars | ChartKind::Ablation => {
                Size::new(600.0, 400.0)
            }
            ChartKind::Waveform | ChartKind::Spectrogram | ChartKind::FeatureMap => {
                Size::new(800.0, 300.0)
            }
            ChartKind::ThresholdSweep
            | ChartKind::MofN
            | ChartKind::BandSweep
            | ChartKind::BandSnr => Size::new(400.0, 300.0),
            ChartKind::LesrBands | ChartKind::FeatureSpace | ChartKind::LiveSpectrogram => {
                Size::new(400.0, 200.0)
            }
        }
    }

    /// Dataset the chart draws from; `None` for self-contained charts.
    pub fn dataset_kind(&self) -> Option<DatasetKind> {
        match self {
            ChartKind::Clusters => Some(DatasetKind::Clusters),
            ChartKind::SubBands(_) | ChartKind::SnrImprovement => Some(DatasetKind::SubBands),
            ChartKind::Roc => Some(DatasetKind::Roc),
            ChartKind::Waveform => Some(DatasetKind::Waveform),
            ChartKind::Spectrogram => Some(DatasetKind::Spectrogram),
            ChartKind::FeatureMap => Some(DatasetKind::Features),
            ChartKind::LesrBands => Some(DatasetKind::LesrBands),
            ChartKind::LiveSpectrogram => Some(DatasetKind::LiveSpectrogram),
            ChartKind::BandSnr => Some(DatasetKind::BandSnr),
            _ => None,
        }
    }
}

pub struct ChartContext<'a> {
    pub dataset: Option<&'a Dataset>,
    pub rng: &'a mut dyn RandomSource,
}

pub trait Chart: Send + Sync {
    fn background(&self, _size: Size) -> Paint {
        Paint::Solid(Color::WHITE)
    }

    /// Returns `None`, without drawing, when the chart needs a dataset it
    /// was not given.
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()>;
}

/// Registry mapping chart tags to drawing strategies.
pub struct ChartRenderer {
    charts: HashMap<ChartKind, Box<dyn Chart>>,
    fallback: Box<dyn Chart>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        let mut renderer = Self {
            charts: HashMap::new(),
            fallback: Box::new(cards::ScatterChart),
        };
        renderer.register(ChartKind::Line, cards::LineChart::default());
        renderer.register(ChartKind::Bar, cards::BarChart);
        renderer.register(ChartKind::Gauge, cards::GaugeChart::default());
        renderer.register(ChartKind::Wave, cards::WaveChart::default());
        renderer.register(ChartKind::Shield, cards::ShieldChart);
        renderer.register(ChartKind::DeviceRow, cards::DeviceRowChart);
        renderer.register(ChartKind::Stability, cards::StabilityChart);
        renderer.register(ChartKind::Scatter, cards::ScatterChart);
        renderer.register(ChartKind::Clusters, charts::ClusterChart);
        for mode in LesrMode::ALL {
            renderer.register(ChartKind::SubBands(mode), charts::SubBandChart { mode });
        }
        renderer.register(ChartKind::SnrImprovement, charts::SnrImprovementChart);
        renderer.register(ChartKind::Roc, charts::RocChart);
        renderer.register(ChartKind::PerformanceBars, analysis::MetricBarsChart::performance());
        renderer.register(ChartKind::Ablation, analysis::MetricBarsChart::ablation());
        renderer.register(ChartKind::Waveform, charts::WaveformChart);
        renderer.register(ChartKind::Spectrogram, charts::SpectrogramChart);
        renderer.register(ChartKind::FeatureMap, charts::FeatureMapChart);
        renderer.register(ChartKind::ThresholdSweep, analysis::ThresholdSweepChart);
        renderer.register(ChartKind::MofN, analysis::MofNChart);
        renderer.register(ChartKind::BandSweep, analysis::BandSweepChart);
        renderer.register(ChartKind::BandSnr, charts::BandSnrChart);
        renderer.register(ChartKind::LesrBands, charts::LesrBandsChart);
        renderer.register(ChartKind::FeatureSpace, charts::FeatureSpaceChart);
        renderer.register(ChartKind::LiveSpectrogram, charts::LiveSpectrogramChart);
        renderer
    }

    /// Replaces the strategy for `kind`.
    pub fn register(&mut self, kind: ChartKind, chart: impl Chart + 'static) {
        self.charts.insert(kind, Box::new(chart));
    }

    pub fn render(
        &self,
        surface: &mut dyn Surface,
        kind: ChartKind,
        dataset: Option<&Dataset>,
        rng: &mut dyn RandomSource,
    ) {
        let size = surface.size();
        let mut ctx = ChartContext { dataset, rng };

        if let Some(chart) = self.charts.get(&kind) {
            surface.clear(chart.background(size));
            if chart.draw(surface, &mut ctx).is_some() {
                return;
            }
            debug!("{:?} chart has no usable dataset, drawing fallback", kind);
        }

        surface.clear(self.fallback.background(size));
        self.fallback.draw(surface, &mut ctx);
    }

    /// Renders `kind` at its [`native_size`](ChartKind::native_size).
    pub fn render_native(
        &self,
        kind: ChartKind,
        dataset: Option<&Dataset>,
        rng: &mut dyn RandomSource,
    ) -> DrawList {
        let size = kind.native_size();
        self.render_to_list(size.width, size.height, kind, dataset, rng)
    }

    /// Renders into a fresh draw list of the given size.
    pub fn render_to_list(
        &self,
        width: f32,
        height: f32,
        kind: ChartKind,
        dataset: Option<&Dataset>,
        rng: &mut dyn RandomSource,
    ) -> DrawList {
        let mut list = DrawList::new(width, height);
        self.render(&mut list, kind, dataset, rng);
        list
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}
