use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{
    self, path, Canvas, Fill, Frame, Geometry, Gradient, LineDash, Path, Stroke, Style, Text,
};
use iced::{mouse, Color, Element, Length, Point, Radians, Rectangle, Renderer, Size, Theme, Vector};
use ipincore::math::Color as ChartColor;
use ipincore::render::{
    DrawList, DrawOp, Label, Paint, Point as ChartPoint, Shape, StrokeStyle, Surface, TextAlign,
};
use std::f32::consts::TAU;

/// Replays a recorded chart onto an iced canvas at its native size.
pub struct DrawListProgram<'a> {
    list: &'a DrawList,
}

pub fn chart_canvas<'a, Message: 'a>(list: &'a DrawList) -> Element<'a, Message> {
    let size = list.size();
    Canvas::new(DrawListProgram { list })
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .into()
}

impl<Message> canvas::Program<Message> for DrawListProgram<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        for op in self.list.ops() {
            match op {
                DrawOp::Fill(shape, paint) => frame.fill(&to_path(shape), to_fill(paint)),
                DrawOp::Stroke(shape, style) => stroke(&mut frame, shape, style),
                DrawOp::Label(label) => fill_label(&mut frame, label),
            }
        }
        vec![frame.into_geometry()]
    }
}

fn to_color(color: ChartColor) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn to_point(point: ChartPoint) -> Point {
    Point::new(point.x, point.y)
}

fn trace(builder: &mut path::Builder, points: &[ChartPoint]) {
    let mut points = points.iter();
    if let Some(first) = points.next() {
        builder.move_to(to_point(*first));
    }
    for point in points {
        builder.line_to(to_point(*point));
    }
}

fn to_path(shape: &Shape) -> Path {
    match shape {
        Shape::Rect { origin, size } => {
            Path::rectangle(to_point(*origin), Size::new(size.width, size.height))
        }
        Shape::Circle { center, radius } => Path::circle(to_point(*center), *radius),
        Shape::Ellipse { center, radii } => Path::new(|builder| {
            builder.ellipse(path::arc::Elliptical {
                center: to_point(*center),
                radii: Vector::new(radii.width, radii.height),
                rotation: Radians(0.0),
                start_angle: Radians(0.0),
                end_angle: Radians(TAU),
            })
        }),
        Shape::Arc {
            center,
            radius,
            start,
            sweep,
        } => Path::new(|builder| {
            builder.arc(path::Arc {
                center: to_point(*center),
                radius: *radius,
                start_angle: Radians(*start),
                end_angle: Radians(start + sweep),
            })
        }),
        Shape::Polyline(points) => Path::new(|builder| trace(builder, points)),
        Shape::Polygon(points) => Path::new(|builder| {
            trace(builder, points);
            builder.close();
        }),
    }
}

fn to_fill(paint: &Paint) -> Fill {
    match *paint {
        Paint::Solid(color) => Fill::from(to_color(color)),
        Paint::Linear {
            start,
            end,
            from,
            to,
        } => {
            let linear = canvas::gradient::Linear::new(to_point(start), to_point(end))
                .add_stop(0.0, to_color(from))
                .add_stop(1.0, to_color(to));
            Fill {
                style: Style::Gradient(Gradient::Linear(linear)),
                ..Fill::default()
            }
        }
    }
}

fn stroke(frame: &mut Frame, shape: &Shape, style: &StrokeStyle) {
    let base = Stroke::default()
        .with_color(to_color(style.color))
        .with_width(style.width);
    match &style.dash {
        Some(segments) => frame.stroke(
            &to_path(shape),
            Stroke {
                line_dash: LineDash {
                    segments: &segments[..],
                    offset: 0,
                },
                ..base
            },
        ),
        None => frame.stroke(&to_path(shape), base),
    }
}

fn horizontal(align: TextAlign) -> Horizontal {
    match align {
        TextAlign::Left => Horizontal::Left,
        TextAlign::Center => Horizontal::Center,
        TextAlign::Right => Horizontal::Right,
    }
}

fn fill_label(frame: &mut Frame, label: &Label) {
    let text = Text {
        content: label.text.clone(),
        position: Point::ORIGIN,
        color: to_color(label.color),
        size: label.size.into(),
        align_x: horizontal(label.align).into(),
        align_y: Vertical::Bottom.into(),
        ..Text::default()
    };
    if label.rotation == 0.0 {
        frame.fill_text(Text {
            position: to_point(label.at),
            ..text
        });
    } else {
        frame.with_save(|frame| {
            frame.translate(Vector::new(label.at.x, label.at.y));
            frame.rotate(label.rotation);
            frame.fill_text(text);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_keep_alpha() {
        let color = to_color(ChartColor::WHITE.with_alpha(0.25));
        assert_eq!(color, Color::from_rgba(1.0, 1.0, 1.0, 0.25));
    }

    #[test]
    fn alignment_maps_one_to_one() {
        assert_eq!(horizontal(TextAlign::Left), Horizontal::Left);
        assert_eq!(horizontal(TextAlign::Center), Horizontal::Center);
        assert_eq!(horizontal(TextAlign::Right), Horizontal::Right);
    }
}
