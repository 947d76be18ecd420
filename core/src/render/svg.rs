//! Standalone SVG documents from recorded draw lists.

use super::surface::{
    DrawList, DrawOp, Label, Paint, Point, Shape, StrokeStyle, Surface, TextAlign,
};
use crate::math::Color;
use std::fmt::Write;

pub fn to_svg(list: &DrawList) -> String {
    let size = list.size();
    let mut defs = String::new();
    let mut body = String::new();

    for (index, op) in list.ops().iter().enumerate() {
        match op {
            DrawOp::Fill(shape, paint) => {
                let fill = match paint {
                    Paint::Solid(color) => color_attrs("fill", color),
                    Paint::Linear {
                        start,
                        end,
                        from,
                        to,
                    } => {
                        let id = format!("g{index}");
                        let _ = write!(
                            defs,
                            "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" \
                             x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">\
                             <stop offset=\"0\" stop-color=\"{}\"/>\
                             <stop offset=\"1\" stop-color=\"{}\"/></linearGradient>",
                            start.x,
                            start.y,
                            end.x,
                            end.y,
                            from.to_hex(),
                            to.to_hex()
                        );
                        format!("fill=\"url(#{id})\"")
                    }
                };
                push_shape(&mut body, shape, &fill);
            }
            DrawOp::Stroke(shape, style) => {
                push_shape(&mut body, shape, &stroke_attrs(style));
            }
            DrawOp::Label(label) => push_label(&mut body, label),
        }
    }

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\">",
        w = size.width,
        h = size.height
    );
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{defs}</defs>");
    }
    svg.push_str(&body);
    svg.push_str("</svg>\n");
    svg
}

fn color_attrs(attr: &str, color: &Color) -> String {
    if color.a < 1.0 {
        format!(
            "{attr}=\"{}\" {attr}-opacity=\"{:.3}\"",
            color.to_hex(),
            color.a
        )
    } else {
        format!("{attr}=\"{}\"", color.to_hex())
    }
}

fn stroke_attrs(style: &StrokeStyle) -> String {
    let mut attrs = format!(
        "fill=\"none\" {} stroke-width=\"{}\"",
        color_attrs("stroke", &style.color),
        style.width
    );
    if let Some([dash, gap]) = style.dash {
        let _ = write!(attrs, " stroke-dasharray=\"{dash} {gap}\"");
    }
    attrs
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_shape(out: &mut String, shape: &Shape, attrs: &str) {
    let _ = match shape {
        Shape::Rect { origin, size } => write!(
            out,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {attrs}/>",
            origin.x, origin.y, size.width, size.height
        ),
        Shape::Circle { center, radius } => write!(
            out,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {attrs}/>",
            center.x, center.y, radius
        ),
        Shape::Ellipse { center, radii } => write!(
            out,
            "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" {attrs}/>",
            center.x, center.y, radii.width, radii.height
        ),
        Shape::Arc {
            center,
            radius,
            start,
            sweep,
        } => {
            let end = start + sweep;
            let from = Point::new(
                center.x + radius * start.cos(),
                center.y + radius * start.sin(),
            );
            let to = Point::new(center.x + radius * end.cos(), center.y + radius * end.sin());
            let large = u8::from(sweep.abs() > std::f32::consts::PI);
            let clockwise = u8::from(*sweep >= 0.0);
            write!(
                out,
                "<path d=\"M {:.2} {:.2} A {r:.2} {r:.2} 0 {large} {clockwise} {:.2} {:.2}\" {attrs}/>",
                from.x,
                from.y,
                to.x,
                to.y,
                r = radius
            )
        }
        Shape::Polyline(points) => write!(
            out,
            "<polyline points=\"{}\" {attrs}/>",
            points_attr(points)
        ),
        Shape::Polygon(points) => write!(
            out,
            "<polygon points=\"{}\" {attrs}/>",
            points_attr(points)
        ),
    };
}

fn push_label(out: &mut String, label: &Label) {
    let anchor = match label.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let transform = if label.rotation != 0.0 {
        format!(
            " transform=\"rotate({:.2} {:.2} {:.2})\"",
            label.rotation.to_degrees(),
            label.at.x,
            label.at.y
        )
    } else {
        String::new()
    };
    let _ = write!(
        out,
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"Inter, sans-serif\" font-size=\"{}\" \
         text-anchor=\"{anchor}\" {}{transform}>{}</text>",
        label.at.x,
        label.at.y,
        label.size,
        color_attrs("fill", &label.color),
        escape(&label.text)
    );
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_viewbox_and_shapes() {
        let mut list = DrawList::new(300.0, 180.0);
        list.clear(Color::WHITE.into());
        list.stroke(
            Shape::line(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            StrokeStyle::new(Color::RED_500, 2.0).dashed(5.0, 5.0),
        );
        let svg = to_svg(&list);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 300 180\""));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("stroke-dasharray=\"5 5\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn gradients_are_declared_in_defs() {
        let mut list = DrawList::new(10.0, 10.0);
        list.clear(Paint::Linear {
            start: Point::ORIGIN,
            end: Point::new(10.0, 10.0),
            from: Color::INDIGO_400,
            to: Color::PURPLE_700,
        });
        let svg = to_svg(&list);
        assert!(svg.contains("<defs><linearGradient id=\"g0\""));
        assert!(svg.contains("fill=\"url(#g0)\""));
    }

    #[test]
    fn label_text_is_escaped() {
        let mut list = DrawList::new(10.0, 10.0);
        list.label(Label::new("a<b & c", Point::ORIGIN, Color::BLACK, 12.0));
        assert!(to_svg(&list).contains("a&lt;b &amp; c"));
    }
}
