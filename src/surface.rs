//! Backend-neutral drawing target.
//!
//! Renderers emit primitives through [`DrawSurface`]. [`RecordingSurface`]
//! collects them as [`DrawCommand`]s, which the gpui backend replays into a
//! window and tests inspect directly.

use crate::data_types::CanvasPoint;
use crate::theme::Color;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

pub trait DrawSurface {
    /// Width and height in pixels.
    fn size(&self) -> (f32, f32);

    fn clear(&mut self, color: Color);

    fn stroke_line(&mut self, from: CanvasPoint, to: CanvasPoint, width: f32, color: Color);

    fn stroke_polyline(&mut self, points: &[CanvasPoint], width: f32, color: Color);

    /// Axis-aligned rectangle with its top-left corner at (`x`, `y`).
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn fill_circle(&mut self, center: CanvasPoint, radius: f32, color: Color);

    /// `at` is the text baseline position.
    fn fill_text(&mut self, text: &str, at: CanvasPoint, anchor: TextAnchor, size: f32, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        from: CanvasPoint,
        to: CanvasPoint,
        width: f32,
        color: Color,
    },
    Polyline {
        points: Vec<CanvasPoint>,
        width: f32,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Circle {
        center: CanvasPoint,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        at: CanvasPoint,
        anchor: TextAnchor,
        size: f32,
        color: Color,
    },
}

/// Headless surface that stores every primitive in order.
///
/// `clear` drops previously recorded commands, so after a frame the list holds
/// exactly that frame's output.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_line(&mut self, from: CanvasPoint, to: CanvasPoint, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[CanvasPoint], width: f32, color: Color) {
        if points.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, center: CanvasPoint, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: CanvasPoint, anchor: TextAnchor, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            anchor,
            size,
            color,
        });
    }
}
