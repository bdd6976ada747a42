//! # dom
//!
//! In-memory retained element tree that stands in for a browser document.
//!
//! - [`Document`]: keyed node arena with attributes, inline style, form
//!   state, listeners and bubbling dispatch
//! - [`Canvas`] / [`Context2d`]: recording 2D context attached to `<canvas>`
//! - [`FrameQueue`]: display-refresh scheduling driven by the host
//! - [`TextMeasurer`]: seam for real font metrics
//!
//! The tree does not parse markup: inner HTML is stored verbatim as a single
//! markup node for the host to render.

pub mod canvas;
pub mod debug;
pub mod frame;
pub mod text;

mod document;
mod error;
mod layout;
mod types;

pub use crate::canvas::{
    Canvas, Context2d, DrawCommand, Image, ImageSource, PathOp, SmoothingQuality,
};
pub use crate::document::{DEFAULT_VIEWPORT_WIDTH, Document, is_valid_tag_name};
pub use crate::error::DomError;
pub use crate::frame::{FrameCallback, FrameQueue, FrameTime};
pub use crate::text::{MonospaceMeasurer, TextMeasurer};
pub use crate::types::{Event, Listener, NodeKey, listener};
