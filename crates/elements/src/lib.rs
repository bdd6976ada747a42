//! # elements
//!
//! Declarative element construction on top of [`dom::Document`].
//!
//! - [`build`]: one-shot builder driven by a tagged argument list
//! - [`Ui`]: context owning the document, the wrapper [`Registry`], the id
//!   source and the frame queue
//! - [`ElementMut`] / [`CanvasMut`]: handles to registered wrappers
//! - [`factory`]: per-tag shorthands such as [`factory::div`]
//!
//! Every wrapped node carries a JSON marker (`data='{"eid":"4821-7"}'`) so a
//! node found in the tree leads back to its wrapper.

pub mod canvas;
pub mod classify;
pub mod factory;
pub mod marker;

mod builder;
mod eid;
mod element;
mod error;
mod registry;
mod ui;

pub use crate::builder::{BuildArg, Content, Item, PropValue, build};
pub use crate::canvas::{
    CanvasMut, DrawingCapability, LoopHandle, Paint, ShapeKind, ShapeSpec, get_shape,
    get_shape_named,
};
pub use crate::classify::{is_attribute_name, is_event_name};
pub use crate::eid::EidGenerator;
pub use crate::element::ElementMut;
pub use crate::error::{BuildError, UiError};
pub use crate::registry::{LibElement, Registry};
pub use crate::ui::{ElementArg, ParentRef, Ui, UiConfig};

pub use core_types::Eid;
