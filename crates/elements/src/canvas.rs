//! Drawing on wrapped `<canvas>` elements.
//!
//! [`CanvasMut`] is the canvas flavour of [`ElementMut`](crate::ElementMut):
//! it is only handed out for wrappers that carry a [`DrawingCapability`].
//! Every primitive starts a fresh path, applies its [`Paint`] to the context
//! and records the resulting commands in the canvas display list.

use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;
use std::str::FromStr;

use core_types::{Eid, Point, Rect, Size};
use dom::{Context2d, FrameQueue, FrameTime, ImageSource, NodeKey, SmoothingQuality};

use crate::ui::Ui;

/// Cancels an animation loop started with [`CanvasMut::animate`].
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled.get()
    }
}

/// Per-canvas state kept on the wrapper record.
#[derive(Debug, Default)]
pub struct DrawingCapability {
    loops: Vec<LoopHandle>,
}

impl DrawingCapability {
    fn track(&mut self, handle: LoopHandle) {
        self.loops.retain(LoopHandle::is_running);
        self.loops.push(handle);
    }

    pub(crate) fn stop_all(self) {
        for handle in self.loops {
            handle.cancel();
        }
    }
}

/// Drawing properties; only the fields that are set touch the context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paint {
    pub line_width: Option<f32>,
    /// Stroke color.
    pub color: Option<String>,
    pub fill: Option<String>,
    pub font: Option<String>,
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    fn has_fill(&self) -> bool {
        self.fill.as_deref().is_some_and(|f| !f.is_empty())
    }

    fn apply(&self, ctx: &mut Context2d) {
        if let Some(width) = self.line_width.filter(|w| w.is_finite() && *w > 0.0) {
            ctx.line_width = width;
        }
        let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
        if let Some(color) = present(&self.color) {
            ctx.stroke_style = color;
        }
        if let Some(fill) = present(&self.fill) {
            ctx.fill_style = fill;
        }
        if let Some(font) = present(&self.font) {
            ctx.font = font;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Pentagon,
    Hexagon,
}

impl ShapeKind {
    fn vertices(self) -> usize {
        match self {
            ShapeKind::Triangle => 3,
            ShapeKind::Pentagon => 5,
            ShapeKind::Hexagon => 6,
        }
    }

    /// Rotation as a fraction of one angular step. Triangle and pentagon
    /// point up in y-down space.
    fn phase(self) -> f32 {
        match self {
            ShapeKind::Triangle => 0.25,
            ShapeKind::Pentagon => 0.75,
            ShapeKind::Hexagon => 0.5,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triangle" => Ok(ShapeKind::Triangle),
            "pentagon" => Ok(ShapeKind::Pentagon),
            "hexagon" => Ok(ShapeKind::Hexagon),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeSpec {
    Points(Vec<Point>),
    Regular {
        kind: ShapeKind,
        size: f32,
        center: Point,
    },
}

/// Vertices of a regular polygon of radius `size` around `center`, with the
/// first vertex repeated at the end to close the outline.
pub fn get_shape(kind: ShapeKind, size: f32, center: Point) -> Vec<Point> {
    let n = kind.vertices();
    let step = TAU / n as f32;
    let phase = step * kind.phase();
    let mut points: Vec<Point> = (0..n)
        .map(|i| {
            let angle = i as f32 * step + phase;
            Point::new(
                angle.cos() * size + center.x,
                angle.sin() * size + center.y,
            )
        })
        .collect();
    points.push(points[0]);
    points
}

/// Like [`get_shape`], by name; unknown names yield no points.
pub fn get_shape_named(name: &str, size: f32, center: Point) -> Vec<Point> {
    name.parse()
        .map(|kind| get_shape(kind, size, center))
        .unwrap_or_default()
}

type AnimationStep = Box<dyn for<'c> FnMut(&mut CanvasMut<'c>, FrameTime)>;

pub struct CanvasMut<'a> {
    ui: &'a mut Ui,
    eid: Eid,
    node: NodeKey,
}

impl<'a> CanvasMut<'a> {
    pub(crate) fn new(ui: &'a mut Ui, eid: Eid, node: NodeKey) -> Self {
        Self { ui, eid, node }
    }

    pub fn eid(&self) -> Eid {
        self.eid
    }

    fn draw(&mut self, what: &str, paint: impl FnOnce(&mut Context2d)) -> &mut Self {
        match self.ui.doc.canvas_mut(self.node) {
            Ok(canvas) => paint(&mut canvas.context),
            Err(err) => log::warn!(target: "elements.canvas", "{} {what}: {err}", self.eid),
        }
        self
    }

    /// Resize the drawing surface; this drops everything drawn so far.
    pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
        match self.ui.doc.canvas_mut(self.node) {
            Ok(canvas) => canvas.set_size(width, height),
            Err(err) => log::warn!(target: "elements.canvas", "{} resize: {err}", self.eid),
        }
        self
    }

    pub fn get_size(&self) -> Size {
        self.ui
            .doc
            .canvas(self.node)
            .map(|canvas| canvas.size())
            .unwrap_or_default()
    }

    /// Image smoothing: 0 low, 1 medium, 2 high. Rounded, then clamped.
    pub fn set_quality(&mut self, level: f32) -> &mut Self {
        let quality = match (level.round() as i32).clamp(0, 2) {
            0 => SmoothingQuality::Low,
            1 => SmoothingQuality::Medium,
            _ => SmoothingQuality::High,
        };
        self.draw("set quality", |ctx| ctx.image_smoothing_quality = quality)
    }

    pub fn clear_canvas(&mut self) -> &mut Self {
        let size = self.get_size();
        self.draw("clear", |ctx| {
            ctx.clear_rect(Rect::new(0.0, 0.0, size.width, size.height), size)
        })
    }

    /// Width of `text` in the current font.
    pub fn text_width(&self, text: &str) -> f32 {
        match self.ui.doc.measure_text(self.node, text) {
            Ok(width) => width,
            Err(err) => {
                log::warn!(target: "elements.canvas", "{} measure text: {err}", self.eid);
                0.0
            }
        }
    }

    pub fn set_properties(&mut self, paint: &Paint) -> &mut Self {
        self.draw("set properties", |ctx| paint.apply(ctx))
    }

    /// Stroke a rectangle, then fill it when the paint has a fill.
    pub fn rect(&mut self, position: Point, size: Size, paint: &Paint) -> &mut Self {
        self.draw("rect", |ctx| {
            paint.apply(ctx);
            ctx.begin_path();
            ctx.rect(position.x, position.y, size.width, size.height);
            ctx.stroke();
            if paint.has_fill() {
                ctx.fill();
            }
        })
    }

    /// Arc around `center`; a full circle unless `angles` gives start and end.
    pub fn circle(
        &mut self,
        center: Point,
        radius: f32,
        angles: Option<(f32, f32)>,
        paint: &Paint,
    ) -> &mut Self {
        let (start, end) = angles.unwrap_or((0.0, TAU));
        self.draw("circle", |ctx| {
            ctx.begin_path();
            paint.apply(ctx);
            if radius > 0.0 {
                ctx.arc(center.x, center.y, radius, start, end);
                ctx.stroke();
                if paint.has_fill() {
                    ctx.fill();
                }
            }
        })
    }

    pub fn line(&mut self, from: Option<Point>, to: Option<Point>, paint: &Paint) -> &mut Self {
        self.draw("line", |ctx| {
            ctx.begin_path();
            paint.apply(ctx);
            if let Some(from) = from {
                ctx.move_to(from.x, from.y);
            }
            if let Some(to) = to {
                ctx.line_to(to.x, to.y);
            }
            ctx.stroke();
        })
    }

    /// Polyline through the given or generated points; filled first when the
    /// paint has a fill, then stroked. No points, no drawing.
    pub fn shape(&mut self, spec: &ShapeSpec, paint: &Paint) -> &mut Self {
        let points = match spec {
            ShapeSpec::Points(points) => points.clone(),
            ShapeSpec::Regular { kind, size, center } => get_shape(*kind, *size, *center),
        };
        self.draw("shape", |ctx| {
            ctx.begin_path();
            paint.apply(ctx);
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            ctx.move_to(first.x, first.y);
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
            if paint.has_fill() {
                ctx.fill();
            }
            ctx.stroke();
        })
    }

    pub fn text(&mut self, text: &str, position: Point, paint: &Paint) -> &mut Self {
        self.draw("text", |ctx| {
            ctx.begin_path();
            paint.apply(ctx);
            if text.is_empty() {
                return;
            }
            if paint.has_fill() {
                ctx.fill_text(text, position.x, position.y);
            }
            ctx.stroke_text(text, position.x, position.y);
        })
    }

    /// Draw an image. URL sources are recorded as-is for the host to resolve
    /// when it replays the display list.
    pub fn image(&mut self, source: ImageSource, position: Point) -> &mut Self {
        self.draw("image", |ctx| ctx.draw_image(source, position.x, position.y))
    }

    /// Run `step` once per frame, starting with the next one, until the
    /// handle is cancelled or the canvas wrapper is removed.
    ///
    /// Nothing is drawn synchronously. Callers that need the first frame
    /// painted immediately call `step` themselves before `animate`.
    pub fn animate(&mut self, step: impl FnMut(&mut CanvasMut<'_>, FrameTime) + 'static) -> LoopHandle {
        let handle = LoopHandle::default();
        if let Some(drawing) = self
            .ui
            .registry
            .get_mut(self.eid)
            .and_then(|record| record.drawing.as_mut())
        {
            drawing.track(handle.clone());
        }
        schedule(&mut self.ui.frames, self.eid, handle.clone(), Box::new(step));
        log::debug!(target: "elements.canvas", "{} animation started", self.eid);
        handle
    }
}

fn schedule(frames: &mut FrameQueue<Ui>, eid: Eid, handle: LoopHandle, mut step: AnimationStep) {
    frames.request(move |ui: &mut Ui, now: FrameTime| {
        if !handle.is_running() {
            return;
        }
        let Some(mut canvas) = ui.canvas(eid) else {
            handle.cancel();
            log::debug!(target: "elements.canvas", "{eid} gone, animation stopped");
            return;
        };
        step(&mut canvas, now);
        if handle.is_running() {
            schedule(&mut ui.frames, eid, handle, step);
        }
    });
}
