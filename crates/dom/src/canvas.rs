//! Recording 2D context for `<canvas>` nodes.
//!
//! The context keeps canvas-style drawing state (line width, colors, font,
//! smoothing) plus a current path, and turns every paint call into a
//! [`DrawCommand`] appended to a display list. Hosts replay the display list
//! onto a real painter; tests assert on it directly.
//!
//! Invariants:
//! - `begin_path` discards the current path; `stroke`/`fill` snapshot it.
//! - Paint commands capture the style that was current when they were issued.
//! - `clear_rect` covering the whole canvas drops every recorded command.

use core_types::{Point, Rect, Size};

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 150;

const DEFAULT_STYLE: &str = "#000000";
const DEFAULT_FONT: &str = "10px sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SmoothingQuality {
    #[default]
    Low,
    Medium,
    High,
}

impl SmoothingQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            SmoothingQuality::Low => "low",
            SmoothingQuality::Medium => "medium",
            SmoothingQuality::High => "high",
        }
    }
}

/// A decoded image the host already holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    Loaded(Image),
    /// Not yet loaded; the host resolves the URL when it replays the command.
    Url(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    Rect(Rect),
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        end: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Stroke {
        path: Vec<PathOp>,
        color: String,
        line_width: f32,
    },
    Fill {
        path: Vec<PathOp>,
        color: String,
    },
    FillText {
        text: String,
        at: Point,
        color: String,
        font: String,
    },
    StrokeText {
        text: String,
        at: Point,
        color: String,
        font: String,
        line_width: f32,
    },
    DrawImage {
        source: ImageSource,
        at: Point,
        smoothing: SmoothingQuality,
    },
    ClearRect(Rect),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Context2d {
    pub line_width: f32,
    pub stroke_style: String,
    pub fill_style: String,
    pub font: String,
    pub image_smoothing_quality: SmoothingQuality,
    path: Vec<PathOp>,
    commands: Vec<DrawCommand>,
}

impl Default for Context2d {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke_style: DEFAULT_STYLE.to_string(),
            fill_style: DEFAULT_STYLE.to_string(),
            font: DEFAULT_FONT.to_string(),
            image_smoothing_quality: SmoothingQuality::default(),
            path: Vec::new(),
            commands: Vec::new(),
        }
    }
}

impl Context2d {
    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(PathOp::MoveTo(Point::new(x, y)));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.push(PathOp::LineTo(Point::new(x, y)));
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.path.push(PathOp::Rect(Rect::new(x, y, width, height)));
    }

    pub fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        self.path.push(PathOp::Arc {
            center: Point::new(x, y),
            radius,
            start,
            end,
        });
    }

    pub fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color: self.stroke_style.clone(),
            line_width: self.line_width,
        });
    }

    pub fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            color: self.fill_style.clone(),
        });
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at: Point::new(x, y),
            color: self.fill_style.clone(),
            font: self.font.clone(),
        });
    }

    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_string(),
            at: Point::new(x, y),
            color: self.stroke_style.clone(),
            font: self.font.clone(),
            line_width: self.line_width,
        });
    }

    pub fn draw_image(&mut self, source: ImageSource, x: f32, y: f32) {
        self.commands.push(DrawCommand::DrawImage {
            source,
            at: Point::new(x, y),
            smoothing: self.image_smoothing_quality,
        });
    }

    pub fn clear_rect(&mut self, area: Rect, canvas: Size) {
        let covers_canvas = area.x <= 0.0
            && area.y <= 0.0
            && area.x + area.width >= canvas.width
            && area.y + area.height >= canvas.height;
        if covers_canvas {
            self.commands.clear();
        } else {
            self.commands.push(DrawCommand::ClearRect(area));
        }
    }

    /// Path built since the last `begin_path`.
    pub fn current_path(&self) -> &[PathOp] {
        &self.path
    }

    /// Display list recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand the display list to the host, leaving the context empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Canvas state attached to every `<canvas>` element.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub context: Context2d,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            context: Context2d::default(),
        }
    }
}

impl Canvas {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Resizing a canvas resets its bitmap, so the display list is dropped.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.context.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_snapshots_current_path_and_style() {
        let mut ctx = Context2d::default();
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.line_to(10.0, 0.0);
        ctx.stroke_style = "red".to_string();
        ctx.line_width = 3.0;
        ctx.stroke();
        ctx.stroke_style = "blue".to_string();

        assert_eq!(
            ctx.commands(),
            &[DrawCommand::Stroke {
                path: vec![
                    PathOp::MoveTo(Point::new(0.0, 0.0)),
                    PathOp::LineTo(Point::new(10.0, 0.0)),
                ],
                color: "red".to_string(),
                line_width: 3.0,
            }]
        );
    }

    #[test]
    fn begin_path_discards_previous_segments() {
        let mut ctx = Context2d::default();
        ctx.rect(0.0, 0.0, 5.0, 5.0);
        ctx.begin_path();
        assert!(ctx.current_path().is_empty());
    }

    #[test]
    fn full_clear_drops_display_list_but_partial_clear_is_recorded() {
        let mut ctx = Context2d::default();
        ctx.fill_text("hi", 1.0, 1.0);
        let size = Size::new(100.0, 50.0);

        ctx.clear_rect(Rect::new(0.0, 0.0, 10.0, 10.0), size);
        assert_eq!(ctx.commands().len(), 2);

        ctx.clear_rect(Rect::new(0.0, 0.0, 100.0, 50.0), size);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn resizing_resets_bitmap() {
        let mut canvas = Canvas::default();
        canvas.context.fill_text("x", 0.0, 0.0);
        canvas.set_size(640, 480);
        assert_eq!(canvas.size(), Size::new(640.0, 480.0));
        assert!(canvas.context.commands().is_empty());
    }
}
