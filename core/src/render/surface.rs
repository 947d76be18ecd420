use crate::math::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Geometry understood by every surface. Angles are radians, measured
/// clockwise from the positive x axis in y-down screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { origin: Point, size: Size },
    Circle { center: Point, radius: f32 },
    Ellipse { center: Point, radii: Size },
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        sweep: f32,
    },
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
}

impl Shape {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Shape::Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Shape::Circle {
            center: Point::new(x, y),
            radius,
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Shape::Polyline(vec![from, to])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    /// Two-stop gradient between `start` and `end`.
    Linear {
        start: Point,
        end: Point,
        from: Color,
        to: Color,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    /// Dash and gap lengths; solid when `None`.
    pub dash: Option<[f32; 2]>,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(self, dash: f32, gap: f32) -> Self {
        Self {
            dash: Some([dash, gap]),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Baseline anchor.
    pub at: Point,
    pub color: Color,
    pub size: f32,
    pub align: TextAlign,
    /// Rotation about `at`, radians.
    pub rotation: f32,
}

impl Label {
    pub fn new(text: impl Into<String>, at: Point, color: Color, size: f32) -> Self {
        Self {
            text: text.into(),
            at,
            color,
            size,
            align: TextAlign::Left,
            rotation: 0.0,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// A fixed-size 2D drawing target.
pub trait Surface {
    fn size(&self) -> Size;
    fn fill(&mut self, shape: Shape, paint: Paint);
    fn stroke(&mut self, shape: Shape, style: StrokeStyle);
    fn label(&mut self, label: Label);

    fn clear(&mut self, paint: Paint) {
        let size = self.size();
        self.fill(
            Shape::Rect {
                origin: Point::ORIGIN,
                size,
            },
            paint,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Fill(Shape, Paint),
    Stroke(Shape, StrokeStyle),
    Label(Label),
}

/// Surface that records operations for later replay (iced canvas, SVG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    size: Size,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Filled rectangles after the first full-surface clear.
    pub fn filled_rects(&self) -> impl Iterator<Item = (Point, Size, &Paint)> + '_ {
        self.ops.iter().skip(1).filter_map(|op| match op {
            DrawOp::Fill(Shape::Rect { origin, size }, paint) => Some((*origin, *size, paint)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Label(label) => Some(label),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, shape: Shape, paint: Paint) {
        self.ops.push(DrawOp::Fill(shape, paint));
    }

    fn stroke(&mut self, shape: Shape, style: StrokeStyle) {
        self.ops.push(DrawOp::Stroke(shape, style));
    }

    fn label(&mut self, label: Label) {
        self.ops.push(DrawOp::Label(label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_covers_whole_surface() {
        let mut list = DrawList::new(300.0, 180.0);
        list.clear(Color::WHITE.into());
        assert_eq!(
            list.ops()[0],
            DrawOp::Fill(Shape::rect(0.0, 0.0, 300.0, 180.0), Paint::Solid(Color::WHITE))
        );
    }

    #[test]
    fn filled_rects_skip_background() {
        let mut list = DrawList::new(10.0, 10.0);
        list.clear(Color::WHITE.into());
        list.fill(Shape::rect(1.0, 1.0, 2.0, 2.0), Color::BLACK.into());
        list.fill(Shape::circle(5.0, 5.0, 1.0), Color::BLACK.into());
        assert_eq!(list.filled_rects().count(), 1);
    }
}
