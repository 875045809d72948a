// gpui backend: replays recorded draw commands into a window.

use crate::data_types::CanvasPoint;
use crate::surface::{DrawCommand, TextAnchor};
use crate::theme::Color;
use gpui::*;

pub fn to_rgba(color: Color) -> Rgba {
    Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub fn to_hsla(color: Color) -> Hsla {
    Hsla::from(to_rgba(color))
}

fn to_point(origin: Point<Pixels>, p: CanvasPoint) -> Point<Pixels> {
    point(origin.x + px(p.x), origin.y + px(p.y))
}

/// Paints `commands` with canvas coordinates relative to `bounds.origin`.
pub fn paint_commands(commands: &[DrawCommand], bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
    let origin = bounds.origin;
    for command in commands {
        match command {
            DrawCommand::Clear(color) => {
                window.paint_quad(fill(bounds, to_hsla(*color)));
            }
            DrawCommand::Line { from, to, width, color } => {
                let mut builder = PathBuilder::stroke(px(width.max(0.5)));
                builder.move_to(to_point(origin, *from));
                builder.line_to(to_point(origin, *to));
                if let Ok(path) = builder.build() {
                    window.paint_path(path, to_rgba(*color));
                }
            }
            DrawCommand::Polyline { points, width, color } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                let mut builder = PathBuilder::stroke(px(width.max(0.5)));
                builder.move_to(to_point(origin, *first));
                for p in rest {
                    builder.line_to(to_point(origin, *p));
                }
                if let Ok(path) = builder.build() {
                    window.paint_path(path, to_rgba(*color));
                }
            }
            DrawCommand::Rect { x, y, width, height, color } => {
                let rect = Bounds::from_corners(
                    to_point(origin, CanvasPoint::new(*x, *y)),
                    to_point(origin, CanvasPoint::new(x + width, y + height)),
                );
                window.paint_quad(fill(rect, to_hsla(*color)));
            }
            DrawCommand::Circle { center, radius, color } => {
                let rect = Bounds::from_corners(
                    to_point(origin, CanvasPoint::new(center.x - radius, center.y - radius)),
                    to_point(origin, CanvasPoint::new(center.x + radius, center.y + radius)),
                );
                window.paint_quad(quad(
                    rect,
                    Corners::all(px(*radius)),
                    to_rgba(*color),
                    Edges::all(px(0.0)),
                    to_rgba(*color),
                    BorderStyle::default(),
                ));
            }
            DrawCommand::Text { text, at, anchor, size, color } => {
                paint_text(window, cx, to_point(origin, *at), text, *anchor, *size, *color);
            }
        }
    }
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    baseline: Point<Pixels>,
    text: &str,
    anchor: TextAnchor,
    size: f32,
    color: Color,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(size), &[run], None);
    let dx = match anchor {
        TextAnchor::Start => px(0.0),
        TextAnchor::Middle => shaped.width / 2.0,
        TextAnchor::End => shaped.width,
    };
    let line_height = shaped.ascent + shaped.descent;
    // Shaped lines paint from their top edge.
    let origin = point(baseline.x - dx, baseline.y - shaped.ascent);
    let _ = shaped.paint(origin, line_height, window, cx);
}
