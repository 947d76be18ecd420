//! Decorative charts embedded in scenario result cards. Drawn in
//! translucent white over the card gradient.

use super::surface::{Paint, Point, Shape, Size, StrokeStyle, Surface};
use super::{Chart, ChartContext};
use crate::math::Color;
use std::f32::consts::PI;

pub fn card_background(size: Size) -> Paint {
    Paint::Linear {
        start: Point::ORIGIN,
        end: Point::new(size.width, size.height),
        from: Color::INDIGO_400,
        to: Color::PURPLE_700,
    }
}

/// Damped sine sampled at 20 points with a dot on every third.
pub struct LineChart {
    pub decay: f32,
}

impl Default for LineChart {
    fn default() -> Self {
        Self { decay: 0.1 }
    }
}

impl LineChart {
    const POINTS: usize = 20;
    const MARGIN: f32 = 30.0;

    fn point(&self, i: usize, size: Size) -> Point {
        let chart_width = size.width - 2.0 * Self::MARGIN;
        let chart_height = size.height - 2.0 * Self::MARGIN;
        let t = i as f32;
        Point::new(
            Self::MARGIN + (t / (Self::POINTS - 1) as f32) * chart_width,
            Self::MARGIN
                + chart_height * (0.2 + 0.6 * (t * 0.3).sin() * (-t * self.decay).exp()),
        )
    }
}

impl Chart for LineChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        let points = (0..Self::POINTS).map(|i| self.point(i, size)).collect();
        surface.stroke(
            Shape::Polyline(points),
            StrokeStyle::new(Color::white_alpha(0.9), 3.0),
        );
        for i in (0..Self::POINTS).step_by(3) {
            let p = self.point(i, size);
            surface.fill(Shape::circle(p.x, p.y, 4.0), Color::white_alpha(0.9).into());
        }
        Some(())
    }
}

pub struct BarChart;

impl BarChart {
    pub const BARS: usize = 8;
    const MARGIN: f32 = 30.0;
}

impl Chart for BarChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        let bar_width = (size.width - 2.0 * Self::MARGIN) / Self::BARS as f32;
        for i in 0..Self::BARS {
            let bar_height = ctx.rng.uniform(0.3, 1.0) as f32 * (size.height - 60.0);
            let x = Self::MARGIN + i as f32 * bar_width + bar_width * 0.1;
            let y = size.height - 30.0 - bar_height;
            let alpha = ctx.rng.uniform(0.6, 0.9) as f32;
            surface.fill(
                Shape::rect(x, y, bar_width * 0.8, bar_height),
                Color::white_alpha(alpha).into(),
            );
        }
        Some(())
    }
}

/// 270 degree dial starting at 135 degrees.
pub struct GaugeChart {
    pub progress: f32,
}

impl Default for GaugeChart {
    fn default() -> Self {
        Self { progress: 0.8 }
    }
}

impl GaugeChart {
    pub const START: f32 = 0.75 * PI;
    pub const FULL_SWEEP: f32 = 1.5 * PI;
}

impl Chart for GaugeChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        let center = size.center();
        let radius = size.min_side() / 3.0;
        surface.stroke(
            Shape::Arc {
                center,
                radius,
                start: Self::START,
                sweep: Self::FULL_SWEEP,
            },
            StrokeStyle::new(Color::white_alpha(0.3), 8.0),
        );
        surface.stroke(
            Shape::Arc {
                center,
                radius,
                start: Self::START,
                sweep: Self::FULL_SWEEP * self.progress.clamp(0.0, 1.0),
            },
            StrokeStyle::new(Color::white_alpha(0.9), 8.0),
        );
        surface.fill(
            Shape::circle(center.x, center.y, 6.0),
            Color::white_alpha(0.9).into(),
        );
        Some(())
    }
}

/// Overlapping phase-shifted sinusoids, at most three.
pub struct WaveChart {
    pub waves: usize,
}

impl Default for WaveChart {
    fn default() -> Self {
        Self { waves: 3 }
    }
}

impl Chart for WaveChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        const MARGIN: f32 = 20.0;
        let size = surface.size();
        for w in 0..self.waves.min(3) {
            let shift = w as f32;
            let mut points = Vec::new();
            let mut x = MARGIN;
            while x < size.width - MARGIN {
                let y = size.height / 2.0
                    + ((x - MARGIN) * 0.02 + shift * PI / 3.0).sin() * (20.0 - shift * 5.0);
                points.push(Point::new(x, y));
                x += 2.0;
            }
            surface.stroke(
                Shape::Polyline(points),
                StrokeStyle::new(Color::white_alpha(0.4 + shift * 0.2), 2.0),
            );
        }
        Some(())
    }
}

pub struct ShieldChart;

impl Chart for ShieldChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        let Point { x: cx, y: cy } = size.center();
        let s = size.min_side() / 3.0;
        let badge = vec![
            Point::new(cx, cy - s),
            Point::new(cx + s * 0.7, cy - s * 0.3),
            Point::new(cx + s * 0.7, cy + s * 0.3),
            Point::new(cx, cy + s),
            Point::new(cx - s * 0.7, cy + s * 0.3),
            Point::new(cx - s * 0.7, cy - s * 0.3),
        ];
        surface.fill(Shape::Polygon(badge), Color::white_alpha(0.9).into());
        surface.stroke(
            Shape::Polyline(vec![
                Point::new(cx - s * 0.3, cy),
                Point::new(cx - s * 0.1, cy + s * 0.2),
                Point::new(cx + s * 0.3, cy - s * 0.2),
            ]),
            StrokeStyle::new(Color::INDIGO_400, 4.0),
        );
        Some(())
    }
}

/// Four squares joined by connectors.
pub struct DeviceRowChart;

impl DeviceRowChart {
    pub const DEVICES: usize = 4;
    pub const DEVICE_SIZE: f32 = 30.0;
}

impl Chart for DeviceRowChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, _ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        let devices = Self::DEVICES as f32;
        let spacing = (size.width - devices * Self::DEVICE_SIZE) / (devices + 1.0);
        let mid = size.height / 2.0;
        for i in 0..Self::DEVICES {
            let x = spacing + i as f32 * (Self::DEVICE_SIZE + spacing);
            surface.fill(
                Shape::rect(
                    x,
                    mid - Self::DEVICE_SIZE / 2.0,
                    Self::DEVICE_SIZE,
                    Self::DEVICE_SIZE,
                ),
                Color::white_alpha(0.8).into(),
            );
            if i > 0 {
                surface.stroke(
                    Shape::line(Point::new(x - spacing, mid), Point::new(x, mid)),
                    StrokeStyle::new(Color::white_alpha(0.6), 2.0),
                );
            }
        }
        Some(())
    }
}

/// Exponentially settling trend with jitter.
pub struct StabilityChart;

impl Chart for StabilityChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        const POINTS: usize = 30;
        const MARGIN: f32 = 20.0;
        let size = surface.size();
        let chart_width = size.width - 2.0 * MARGIN;
        let chart_height = size.height - 2.0 * MARGIN;
        let points = (0..POINTS)
            .map(|i| {
                let trend = 0.3 + 0.4 * (-(i as f32) * 0.05).exp();
                let noise = (ctx.rng.next_unit() as f32 - 0.5) * 0.1;
                Point::new(
                    MARGIN + (i as f32 / (POINTS - 1) as f32) * chart_width,
                    MARGIN + chart_height * (trend + noise),
                )
            })
            .collect();
        surface.stroke(
            Shape::Polyline(points),
            StrokeStyle::new(Color::white_alpha(0.9), 3.0),
        );
        Some(())
    }
}

/// Fallback for anything without a dedicated chart: 20 random dots.
pub struct ScatterChart;

impl Chart for ScatterChart {
    fn background(&self, size: Size) -> Paint {
        card_background(size)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &mut ChartContext<'_>) -> Option<()> {
        let size = surface.size();
        for _ in 0..20 {
            let x = ctx.rng.next_unit() as f32 * size.width;
            let y = ctx.rng.next_unit() as f32 * size.height;
            let radius = ctx.rng.uniform(2.0, 6.0) as f32;
            surface.fill(Shape::circle(x, y, radius), Color::white_alpha(0.8).into());
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FixedSequence;
    use crate::render::surface::{DrawList, DrawOp};

    fn draw(chart: &dyn Chart) -> DrawList {
        let mut list = DrawList::new(300.0, 180.0);
        let mut rng = FixedSequence::new(vec![0.0, 0.5, 0.99]);
        let mut ctx = ChartContext {
            dataset: None,
            rng: &mut rng,
        };
        assert!(chart.draw(&mut list, &mut ctx).is_some());
        list
    }

    #[test]
    fn gauge_sweeps_from_135_degrees() {
        let list = draw(&GaugeChart::default());
        let arcs: Vec<_> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke(Shape::Arc { start, sweep, .. }, _) => Some((*start, *sweep)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 2);
        assert!((arcs[0].0.to_degrees() - 135.0).abs() < 1e-3);
        assert!((arcs[0].1.to_degrees() - 270.0).abs() < 1e-3);
        assert!((arcs[1].1.to_degrees() - 216.0).abs() < 1e-3);
    }

    #[test]
    fn bar_chart_draws_eight_bars_inside_card() {
        let mut list = DrawList::new(300.0, 180.0);
        list.clear(card_background(list.size()));
        let mut rng = FixedSequence::new(vec![0.0, 0.99]);
        let mut ctx = ChartContext {
            dataset: None,
            rng: &mut rng,
        };
        BarChart.draw(&mut list, &mut ctx);
        let bars: Vec<_> = list.filled_rects().collect();
        assert_eq!(bars.len(), BarChart::BARS);
        for (origin, size, _) in bars {
            assert!(origin.y >= 0.0);
            assert!((origin.y + size.height - 150.0).abs() < 1e-3);
        }
    }

    #[test]
    fn device_row_has_three_connectors() {
        let list = draw(&DeviceRowChart);
        let connectors = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke(Shape::Polyline(_), _)))
            .count();
        assert_eq!(connectors, DeviceRowChart::DEVICES - 1);
    }

    #[test]
    fn wave_chart_caps_at_three_layers() {
        let list = draw(&WaveChart { waves: 5 });
        assert_eq!(list.ops().len(), 3);
    }

    #[test]
    fn shield_is_hexagon_with_check() {
        let list = draw(&ShieldChart);
        assert!(matches!(&list.ops()[0], DrawOp::Fill(Shape::Polygon(p), _) if p.len() == 6));
        assert!(matches!(&list.ops()[1], DrawOp::Stroke(Shape::Polyline(p), _) if p.len() == 3));
    }

    #[test]
    fn scatter_draws_twenty_dots() {
        let list = draw(&ScatterChart);
        assert_eq!(list.ops().len(), 20);
    }
}
