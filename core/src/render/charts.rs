//! Dataset-driven charts for the visualisation page and the demo run.

use super::surface::{Label, Point, Shape, Size, StrokeStyle, Surface, TextAlign};
use super::{Chart, ChartContext, Paint};
use crate::math::{Color, StatsHelper};
use crate::synthetic::{Dataset, LesrMode, PERFORMANCE_SUMMARY};
use ndarray::Array2;
use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

const AXIS_MARGIN: f32 = 50.0;
/// Upper bound of the per-band SNR improvement series, in dB.
const SNR_CEILING: f32 = 15.0;

fn caption(surface: &mut dyn Surface, text: impl Into<String>, at: Point, size: f32) {
    surface.label(Label::new(text, at, Color::SLATE_800, size).align(TextAlign::Center));
}

fn vertical_caption(surface: &mut dyn Surface, text: impl Into<String>, color: Color, size: f32) {
    let height = surface.size().height;
    surface.label(
        Label::new(text, Point::new(15.0, height / 2.0), color, size)
            .align(TextAlign::Center)
            .rotated(-FRAC_PI_2),
    );
}

/// Fake t-SNE scatter with an 80x60 boundary around each cluster mean.
pub struct ClusterChart;

impl Chart for ClusterChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::Clusters(points)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();

        let mut members: BTreeMap<usize, Vec<(f32, f32)>> = BTreeMap::new();
        for point in points {
            surface.fill(Shape::circle(point.x, point.y, 4.0), point.color.into());
            members.entry(point.user).or_default().push((point.x, point.y));
        }

        let boundary = StrokeStyle::new(Color::BLACK.with_alpha(0.3), 2.0);
        for cluster in members.values() {
            if let Some((x, y)) = StatsHelper::centroid(cluster) {
                surface.stroke(
                    Shape::Ellipse {
                        center: Point::new(x, y),
                        radii: Size::new(80.0, 60.0),
                    },
                    boundary,
                );
            }
        }

        caption(
            surface,
            "t-SNE dimension 1",
            Point::new(size.width / 2.0, size.height - 10.0),
            14.0,
        );
        vertical_caption(surface, "t-SNE dimension 2", Color::SLATE_800, 14.0);
        Some(())
    }
}

/// One bar per band for the selected LESR series.
pub struct SubBandChart {
    pub mode: LesrMode,
}

impl SubBandChart {
    /// Maps a raw series value into `[0, 1]` bar height.
    pub fn normalize(&self, value: f32) -> f32 {
        let normalized = match self.mode {
            LesrMode::Energy => value,
            LesrMode::Ratio => (value + 2.0) / 4.0,
            LesrMode::Snr => value / SNR_CEILING,
        };
        normalized.clamp(0.0, 1.0)
    }

    fn hue(&self, normalized: f32) -> f32 {
        match self.mode {
            LesrMode::Snr => normalized * 120.0,
            LesrMode::Energy | LesrMode::Ratio => 240.0 - normalized * 120.0,
        }
    }
}

impl Chart for SubBandChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::SubBands(metrics)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        let series = metrics.series(self.mode);
        let bar_width = (size.width - 60.0) / series.len().max(1) as f32;
        let max_height = size.height - 80.0;

        for (i, value) in series.iter().enumerate() {
            let normalized = self.normalize(*value);
            let bar_height = normalized * max_height;
            surface.fill(
                Shape::rect(
                    30.0 + i as f32 * bar_width,
                    size.height - bar_height - 40.0,
                    bar_width - 2.0,
                    bar_height,
                ),
                Color::hsl(self.hue(normalized), 70.0, 50.0).into(),
            );
        }

        caption(surface, self.mode.title(), Point::new(size.width / 2.0, 20.0), 12.0);
        caption(
            surface,
            "Band index",
            Point::new(size.width / 2.0, size.height - 10.0),
            12.0,
        );
        Some(())
    }
}

/// SNR improvement bars scaled to the best band, with a dashed average.
pub struct SnrImprovementChart;

impl Chart for SnrImprovementChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::SubBands(metrics)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        let snr = &metrics.snr;
        let max = StatsHelper::max(snr).max(f32::EPSILON);
        let bar_width = (size.width - 60.0) / snr.len().max(1) as f32;
        let max_height = size.height - 80.0;

        for (i, value) in snr.iter().enumerate() {
            let ratio = value / max;
            let bar_height = ratio * max_height;
            surface.fill(
                Shape::rect(
                    30.0 + i as f32 * bar_width,
                    size.height - bar_height - 40.0,
                    bar_width - 2.0,
                    bar_height,
                ),
                Color::quality(ratio).into(),
            );
        }

        let average = StatsHelper::mean(snr);
        let average_y = size.height - (average / max) * max_height - 40.0;
        surface.stroke(
            Shape::line(
                Point::new(30.0, average_y),
                Point::new(size.width - 30.0, average_y),
            ),
            StrokeStyle::new(Color::RED_500, 2.0).dashed(5.0, 5.0),
        );

        caption(
            surface,
            "SNR improvement (dB)",
            Point::new(size.width / 2.0, 20.0),
            12.0,
        );
        caption(
            surface,
            format!("Average: {average:.1} dB"),
            Point::new(size.width / 2.0, size.height - 10.0),
            12.0,
        );
        Some(())
    }
}

pub struct RocChart;

impl Chart for RocChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::Roc(points)) = ctx.dataset else {
            return None;
        };
        let Size { width, height } = surface.size();
        let m = AXIS_MARGIN;
        let chart_width = width - 2.0 * m;
        let chart_height = height - 2.0 * m;

        surface.stroke(
            Shape::Polyline(vec![
                Point::new(m, m),
                Point::new(m, height - m),
                Point::new(width - m, height - m),
            ]),
            StrokeStyle::new(Color::SLATE_500, 1.0),
        );
        surface.stroke(
            Shape::line(Point::new(m, height - m), Point::new(width - m, m)),
            StrokeStyle::new(Color::GRAY_300, 1.0).dashed(5.0, 5.0),
        );
        let curve = points
            .iter()
            .map(|p| Point::new(m + p.fpr * chart_width, height - m - p.tpr * chart_height))
            .collect();
        surface.stroke(
            Shape::Polyline(curve),
            StrokeStyle::new(Color::BLUE_600, 3.0),
        );

        caption(
            surface,
            "False positive rate (FPR)",
            Point::new(width / 2.0, height - 10.0),
            12.0,
        );
        vertical_caption(surface, "True positive rate (TPR)", Color::SLATE_800, 12.0);
        surface.label(Label::new(
            format!("AUC = {}", PERFORMANCE_SUMMARY.auc),
            Point::new(m + 10.0, m + 20.0),
            Color::SLATE_800,
            12.0,
        ));
        Some(())
    }
}

pub struct WaveformChart;

impl Chart for WaveformChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::Waveform(samples)) = ctx.dataset else {
            return None;
        };
        let Size { width, height } = surface.size();
        let m = AXIS_MARGIN;
        let chart_width = width - 2.0 * m;
        let chart_height = height - 2.0 * m;
        let mid = m + chart_height / 2.0;

        let trace = samples
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Point::new(
                    m + (i as f32 / samples.len() as f32) * chart_width,
                    mid + v * chart_height / 4.0,
                )
            })
            .collect();
        surface.stroke(Shape::Polyline(trace), StrokeStyle::new(Color::BLUE_600, 2.0));
        surface.stroke(
            Shape::line(Point::new(m, mid), Point::new(width - m, mid)),
            StrokeStyle::new(Color::GRAY_300, 1.0),
        );
        Some(())
    }
}

/// Paints `grid` (time x frequency) into `area`, lowest frequency at the bottom.
fn paint_heat_grid(surface: &mut dyn Surface, grid: &Array2<f32>, origin: Point, area: Size) {
    let (time_steps, freq_bins) = grid.dim();
    if time_steps == 0 || freq_bins == 0 {
        return;
    }
    let step_width = area.width / time_steps as f32;
    let bin_height = area.height / freq_bins as f32;
    for ((t, f), intensity) in grid.indexed_iter() {
        surface.fill(
            Shape::rect(
                origin.x + t as f32 * step_width,
                origin.y + (freq_bins - f - 1) as f32 * bin_height,
                step_width,
                bin_height,
            ),
            Color::heat(*intensity).into(),
        );
    }
}

pub struct SpectrogramChart;

impl Chart for SpectrogramChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::Spectrogram(grid)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        let m = AXIS_MARGIN;
        paint_heat_grid(
            surface,
            grid,
            Point::new(m, m),
            Size::new(size.width - 2.0 * m, size.height - 2.0 * m),
        );
        Some(())
    }
}

/// 32x16 map of the first 512 feature values.
pub struct FeatureMapChart;

impl FeatureMapChart {
    pub const COLS: usize = 32;
    pub const ROWS: usize = 16;
}

impl Chart for FeatureMapChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::Features(features)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        let m = AXIS_MARGIN;
        let chart_width = size.width - 2.0 * m;
        let chart_height = size.height - 2.0 * m;
        let cell_width = chart_width / Self::COLS as f32;
        let cell_height = chart_height / Self::ROWS as f32;

        for (i, value) in features.iter().take(Self::COLS * Self::ROWS).enumerate() {
            let row = (i / Self::COLS) as f32;
            let col = (i % Self::COLS) as f32;
            let intensity = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
            surface.fill(
                Shape::rect(
                    m + col * cell_width,
                    m + row * cell_height,
                    cell_width - 1.0,
                    cell_height - 1.0,
                ),
                Color::hsl(intensity * 240.0, 70.0, 50.0 + intensity * 30.0).into(),
            );
        }

        let grid = StrokeStyle::new(Color::white_alpha(0.3), 1.0);
        for i in 0..=Self::COLS {
            let x = m + i as f32 * cell_width;
            surface.stroke(
                Shape::line(Point::new(x, m), Point::new(x, m + chart_height)),
                grid,
            );
        }
        for i in 0..=Self::ROWS {
            let y = m + i as f32 * cell_height;
            surface.stroke(
                Shape::line(Point::new(m, y), Point::new(m + chart_width, y)),
                grid,
            );
        }
        Some(())
    }
}

/// Sub-band intensities shown once the LESR step of a run finishes.
pub struct LesrBandsChart;

impl Chart for LesrBandsChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::LesrBands(bands)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        let band_width = size.width / bands.len().max(1) as f32;

        for (i, intensity) in bands.iter().enumerate() {
            let bar_height = intensity * (size.height - 40.0);
            surface.fill(
                Shape::rect(
                    i as f32 * band_width + 2.0,
                    size.height - bar_height - 20.0,
                    band_width - 4.0,
                    bar_height,
                ),
                Color::quality(*intensity).into(),
            );
        }

        surface.label(Label::new(
            "LESR sub-band energy",
            Point::new(10.0, 15.0),
            Color::SLATE_800,
            12.0,
        ));
        surface.label(
            Label::new(
                format!("{} bands @ SWT-8", bands.len()),
                Point::new(size.width - 10.0, 15.0),
                Color::SLATE_800,
                12.0,
            )
            .align(TextAlign::Right),
        );
        Some(())
    }
}

/// Random embedding cloud with the current sample highlighted.
pub struct FeatureSpaceChart;

impl Chart for FeatureSpaceChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        for _ in 0..100 {
            let x = ctx.rng.next_unit() as f32 * (size.width - 60.0) + 30.0;
            let y = ctx.rng.next_unit() as f32 * (size.height - 60.0) + 30.0;
            let radius = ctx.rng.uniform(2.0, 6.0) as f32;
            surface.fill(Shape::circle(x, y, radius), Color::BLUE_600.into());
        }
        surface.fill(
            Shape::circle(size.width * 0.7, size.height * 0.3, 8.0),
            Color::RED_500.into(),
        );

        surface.label(Label::new(
            "PANNs + LESR feature space",
            Point::new(10.0, 15.0),
            Color::SLATE_800,
            12.0,
        ));
        surface.label(Label::new(
            "\u{25cf} current sample",
            Point::new(size.width - 100.0, 15.0),
            Color::RED_500,
            12.0,
        ));
        Some(())
    }
}

pub struct LiveSpectrogramChart;

impl Chart for LiveSpectrogramChart {
    fn background(&self, _size: Size) -> Paint {
        Paint::Solid(Color::BLACK)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::LiveSpectrogram(grid)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        paint_heat_grid(surface, grid, Point::ORIGIN, size);
        surface.label(Label::new(
            "Frequency (Hz)",
            Point::new(10.0, 20.0),
            Color::WHITE,
            12.0,
        ));
        vertical_caption(surface, "Time (s)", Color::WHITE, 12.0);
        Some(())
    }
}

/// Per-band SNR gain on the parameter analysis page, scaled to 12 dB.
pub struct BandSnrChart;

impl Chart for BandSnrChart {
    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let Some(Dataset::BandSnr(values)) = ctx.dataset else {
            return None;
        };
        let size = surface.size();
        let max = crate::synthetic::signal::BAND_SNR_MAX;
        let bar_width = (size.width - 40.0) / values.len().max(1) as f32;
        for (i, snr) in values.iter().enumerate() {
            let ratio = (snr / max).clamp(0.0, 1.0);
            let bar_height = ratio * (size.height - 40.0);
            surface.fill(
                Shape::rect(
                    20.0 + i as f32 * bar_width,
                    size.height - 20.0 - bar_height,
                    bar_width - 2.0,
                    bar_height,
                ),
                Color::quality(ratio).into(),
            );
        }
        Some(())
    }
}

/// Grey card shown before any audio has been processed.
pub fn render_placeholder(surface: &mut dyn Surface, title: &str) {
    let size = surface.size();
    surface.clear(Color::SLATE_50.into());
    surface.label(
        Label::new(
            format!("{title} (waiting for audio)"),
            size.center(),
            Color::SLATE_500,
            16.0,
        )
        .align(TextAlign::Center),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EntropySource, FixedSequence};
    use crate::render::surface::{DrawList, DrawOp};
    use crate::synthetic::{generate_clusters, generate_roc, generate_sub_bands, signal};

    fn draw_with(chart: &dyn Chart, dataset: Option<&Dataset>, width: f32, height: f32) -> (DrawList, bool) {
        let mut list = DrawList::new(width, height);
        list.clear(Color::WHITE.into());
        let mut rng = EntropySource::seeded(4);
        let mut ctx = ChartContext {
            dataset,
            rng: &mut rng,
        };
        let drawn = chart.draw(&mut list, &mut ctx).is_some();
        (list, drawn)
    }

    #[test]
    fn sub_band_bars_match_band_count_and_height_limit() {
        let mut rng = EntropySource::seeded(8);
        for bands in crate::synthetic::subband::MIN_BANDS..=crate::synthetic::subband::MAX_BANDS {
            let dataset = Dataset::SubBands(generate_sub_bands(bands, &mut rng));
            for mode in LesrMode::ALL {
                let (list, drawn) = draw_with(&SubBandChart { mode }, Some(&dataset), 600.0, 300.0);
                assert!(drawn);
                let bars: Vec<_> = list.filled_rects().collect();
                assert_eq!(bars.len(), bands, "mode {mode}");
                for (_, size, _) in bars {
                    assert!(size.height >= 0.0 && size.height <= 300.0 - 80.0);
                }
            }
        }
    }

    #[test]
    fn snr_mode_prefers_green_for_high_values() {
        let chart = SubBandChart {
            mode: LesrMode::Snr,
        };
        assert_eq!(chart.normalize(15.0), 1.0);
        assert_eq!(chart.hue(1.0), 120.0);
        let energy = SubBandChart {
            mode: LesrMode::Energy,
        };
        assert_eq!(energy.hue(1.0), 120.0);
        assert_eq!(energy.hue(0.0), 240.0);
    }

    #[test]
    fn missing_or_mismatched_dataset_is_rejected() {
        let roc = Dataset::Roc(generate_roc(&mut FixedSequence::constant(0.1)));
        assert!(!draw_with(&ClusterChart, None, 800.0, 600.0).1);
        assert!(!draw_with(&ClusterChart, Some(&roc), 800.0, 600.0).1);
        assert!(draw_with(&RocChart, Some(&roc), 600.0, 400.0).1);
    }

    #[test]
    fn cluster_chart_draws_one_ellipse_per_user() {
        let mut rng = EntropySource::seeded(3);
        let dataset = Dataset::Clusters(generate_clusters(6, &mut rng));
        let (list, _) = draw_with(&ClusterChart, Some(&dataset), 800.0, 600.0);
        let ellipses = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke(Shape::Ellipse { .. }, _)))
            .count();
        assert_eq!(ellipses, 6);
    }

    #[test]
    fn snr_average_line_is_dashed_red() {
        let mut rng = EntropySource::seeded(1);
        let dataset = Dataset::SubBands(generate_sub_bands(32, &mut rng));
        let (list, _) = draw_with(&SnrImprovementChart, Some(&dataset), 600.0, 300.0);
        let dashed = list.ops().iter().find_map(|op| match op {
            DrawOp::Stroke(_, style) if style.dash.is_some() => Some(style.color),
            _ => None,
        });
        assert_eq!(dashed, Some(Color::RED_500));
    }

    #[test]
    fn spectrogram_fills_every_cell() {
        let mut rng = FixedSequence::constant(0.5);
        let dataset = Dataset::Spectrogram(signal::generate_spectrogram(&mut rng));
        let (list, _) = draw_with(&SpectrogramChart, Some(&dataset), 600.0, 400.0);
        assert_eq!(
            list.filled_rects().count(),
            signal::SPECTROGRAM_TIME_STEPS * signal::SPECTROGRAM_FREQ_BINS
        );
    }

    #[test]
    fn feature_map_is_capped_at_grid() {
        let dataset = Dataset::Features(vec![0.0; 600]);
        let (list, _) = draw_with(&FeatureMapChart, Some(&dataset), 600.0, 400.0);
        assert_eq!(
            list.filled_rects().count(),
            FeatureMapChart::COLS * FeatureMapChart::ROWS
        );
    }

    #[test]
    fn placeholder_mentions_title() {
        let mut list = DrawList::new(400.0, 200.0);
        render_placeholder(&mut list, "Spectrogram");
        let label = list.labels().next().unwrap();
        assert_eq!(label.text, "Spectrogram (waiting for audio)");
    }
}
