//! Small value types shared by the surface and the element layer.

mod eid;
mod geometry;

pub use eid::{Eid, ParseEidError};
pub use geometry::{Point, Rect, Size};
