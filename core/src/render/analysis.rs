//! Fixed-table charts: metric comparisons and parameter sweeps.

use super::surface::{Label, Point, Shape, StrokeStyle, Surface, TextAlign};
use super::{Chart, ChartContext};
use crate::math::Color;
use crate::synthetic::gallery::{
    threshold_sweep, MetricBar, BAND_SWEEP, MOFN_CONFIGS, OPTIMAL_BAND_INDEX, RECOMMENDED_MOFN,
};

/// Labelled horizontal bars, one row per metric.
pub struct MetricBarsChart {
    pub bars: &'static [MetricBar],
    pub title: &'static str,
    pub title_size: f32,
    pub margin: f32,
    pub top: f32,
    pub spacing: f32,
}

impl MetricBarsChart {
    const BAR_HEIGHT: f32 = 40.0;

    pub fn performance() -> Self {
        Self {
            bars: &crate::synthetic::gallery::PERFORMANCE_BARS,
            title: "Performance metrics",
            title_size: 16.0,
            margin: 100.0,
            top: 100.0,
            spacing: 60.0,
        }
    }

    pub fn ablation() -> Self {
        Self {
            bars: &crate::synthetic::gallery::ABLATION_BARS,
            title: "Ablation study - F1 comparison",
            title_size: 18.0,
            margin: 150.0,
            top: 60.0,
            spacing: 80.0,
        }
    }
}

impl Chart for MetricBarsChart {
    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let width = surface.size().width;
        for (i, bar) in self.bars.iter().enumerate() {
            let y = self.top + i as f32 * self.spacing;
            let bar_width = bar.value * (width - 2.0 * self.margin);
            surface.fill(
                Shape::rect(self.margin, y, bar_width, Self::BAR_HEIGHT),
                bar.color.into(),
            );
            surface.label(
                Label::new(
                    format!("{:.3}", bar.value),
                    Point::new(self.margin + bar_width / 2.0, y + 25.0),
                    Color::WHITE,
                    14.0,
                )
                .align(TextAlign::Center),
            );
            surface.label(Label::new(
                bar.name,
                Point::new(10.0, y + 25.0),
                Color::SLATE_800,
                14.0,
            ));
        }
        surface.label(
            Label::new(
                self.title,
                Point::new(width / 2.0, 30.0),
                Color::SLATE_800,
                self.title_size,
            )
            .align(TextAlign::Center),
        );
        Some(())
    }
}

/// Maps a unit-square point into the 20px-inset plot area.
fn inset(surface: &dyn Surface, x: f32, y: f32) -> Point {
    let size = surface.size();
    Point::new(
        20.0 + x * (size.width - 40.0),
        20.0 + (1.0 - y) * (size.height - 40.0),
    )
}

pub struct ThresholdSweepChart;

impl Chart for ThresholdSweepChart {
    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let curve = threshold_sweep()
            .into_iter()
            .map(|(t, f1)| inset(surface, t, f1))
            .collect();
        surface.stroke(Shape::Polyline(curve), StrokeStyle::new(Color::BLUE_600, 2.0));
        let optimum = inset(surface, 0.5, 1.0);
        surface.fill(Shape::circle(optimum.x, optimum.y, 5.0), Color::RED_500.into());
        Some(())
    }
}

/// Usability (x) against security (y) for each M-of-N configuration.
pub struct MofNChart;

impl Chart for MofNChart {
    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        for (i, config) in MOFN_CONFIGS.iter().enumerate() {
            let p = inset(surface, config.usability, config.security);
            let (color, radius) = if i == RECOMMENDED_MOFN {
                (Color::RED_500, 8.0)
            } else {
                (Color::BLUE_500, 5.0)
            };
            surface.fill(Shape::circle(p.x, p.y, radius), color.into());
        }
        Some(())
    }
}

pub struct BandSweepChart;

impl Chart for BandSweepChart {
    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let last = (BAND_SWEEP.len() - 1) as f32;
        let curve = BAND_SWEEP
            .iter()
            .enumerate()
            .map(|(i, (_, score))| inset(surface, i as f32 / last, *score))
            .collect();
        surface.stroke(Shape::Polyline(curve), StrokeStyle::new(Color::GREEN_500, 3.0));
        let optimum = inset(
            surface,
            OPTIMAL_BAND_INDEX as f32 / last,
            BAND_SWEEP[OPTIMAL_BAND_INDEX].1,
        );
        surface.fill(Shape::circle(optimum.x, optimum.y, 6.0), Color::RED_500.into());
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FixedSequence;
    use crate::render::surface::{DrawList, DrawOp, Paint};

    fn draw(chart: &dyn Chart, width: f32, height: f32) -> DrawList {
        let mut list = DrawList::new(width, height);
        let mut rng = FixedSequence::constant(0.5);
        let mut ctx = ChartContext {
            dataset: None,
            rng: &mut rng,
        };
        chart.draw(&mut list, &mut ctx);
        list
    }

    #[test]
    fn performance_bars_scale_with_value() {
        let list = draw(&MetricBarsChart::performance(), 600.0, 400.0);
        let widths: Vec<f32> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(Shape::Rect { size, .. }, _) => Some(size.width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 4);
        assert!((widths[0] - 0.999 * 400.0).abs() < 1e-3);
        assert!(widths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ablation_labels_every_method() {
        let list = draw(&MetricBarsChart::ablation(), 800.0, 400.0);
        let names: Vec<_> = list.labels().map(|l| l.text.as_str()).collect();
        assert!(names.contains(&"Without LESR"));
        assert!(names.contains(&"0.847"));
    }

    #[test]
    fn recommended_mofn_is_highlighted() {
        let list = draw(&MofNChart, 300.0, 200.0);
        let highlighted = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Fill(_, Paint::Solid(c)) if *c == Color::RED_500))
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn threshold_optimum_sits_on_top_edge() {
        let list = draw(&ThresholdSweepChart, 300.0, 200.0);
        let optimum = list.ops().iter().find_map(|op| match op {
            DrawOp::Fill(Shape::Circle { center, .. }, _) => Some(*center),
            _ => None,
        });
        assert_eq!(optimum, Some(Point::new(150.0, 20.0)));
    }
}
