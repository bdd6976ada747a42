//! The element context: document, registry, id source and frame queue.
//!
//! Everything that used to be process-global lives on [`Ui`], so independent
//! contexts can coexist (one per test, for instance) and teardown is explicit.

use std::fmt;

use core_types::Eid;
use dom::{
    DEFAULT_VIEWPORT_WIDTH, Document, FrameQueue, FrameTime, Listener, MonospaceMeasurer, NodeKey,
    TextMeasurer,
};

use crate::canvas::CanvasMut;
use crate::eid::EidGenerator;
use crate::element::ElementMut;
use crate::error::{BuildError, UiError};
use crate::marker;
use crate::registry::{LibElement, Registry};

pub struct UiConfig {
    pub viewport_width: f32,
    pub measurer: Box<dyn TextMeasurer>,
    /// Fixed seed for the random id component; entropy when `None`.
    pub eid_seed: Option<u64>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            measurer: Box::new(MonospaceMeasurer::default()),
            eid_seed: None,
        }
    }
}

impl fmt::Debug for UiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiConfig")
            .field("viewport_width", &self.viewport_width)
            .field("eid_seed", &self.eid_seed)
            .finish_non_exhaustive()
    }
}

impl UiConfig {
    pub fn viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn eid_seed(mut self, seed: u64) -> Self {
        self.eid_seed = Some(seed);
        self
    }
}

/// Where an element gets attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentRef {
    /// Another wrapper; recorded as the owning parent.
    Element(Eid),
    /// A plain document node; ownership is not recorded.
    Node(NodeKey),
}

impl From<Eid> for ParentRef {
    fn from(eid: Eid) -> Self {
        ParentRef::Element(eid)
    }
}

impl From<NodeKey> for ParentRef {
    fn from(node: NodeKey) -> Self {
        ParentRef::Node(node)
    }
}

/// One argument to [`Ui::create_element`].
#[derive(Clone)]
pub enum ElementArg {
    Parent(ParentRef),
    /// Adopt an existing node instead of the freshly created one.
    Mount(NodeKey),
    Event(String, Listener),
    Text(String),
    Children(Vec<Eid>),
    Attributes(Vec<(String, String)>),
}

impl ElementArg {
    pub fn parent(parent: impl Into<ParentRef>) -> Self {
        ElementArg::Parent(parent.into())
    }

    pub fn event(name: &str, f: impl Fn(&dom::Event) + 'static) -> Self {
        ElementArg::Event(name.to_string(), dom::listener(f))
    }

    pub fn text(text: impl Into<String>) -> Self {
        ElementArg::Text(text.into())
    }

    pub fn children(children: impl IntoIterator<Item = Eid>) -> Self {
        ElementArg::Children(children.into_iter().collect())
    }

    pub fn attributes<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        ElementArg::Attributes(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for ElementArg {
    fn from(text: &str) -> Self {
        ElementArg::text(text)
    }
}

impl fmt::Debug for ElementArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementArg::Parent(parent) => write!(f, "Parent({parent:?})"),
            ElementArg::Mount(node) => write!(f, "Mount({node})"),
            ElementArg::Event(name, _) => write!(f, "Event({name:?}, ..)"),
            ElementArg::Text(text) => write!(f, "Text({text:?})"),
            ElementArg::Children(eids) => write!(f, "Children({eids:?})"),
            ElementArg::Attributes(pairs) => write!(f, "Attributes({pairs:?})"),
        }
    }
}

pub struct Ui {
    pub(crate) doc: Document,
    pub(crate) registry: Registry,
    pub(crate) eids: EidGenerator,
    pub(crate) frames: FrameQueue<Ui>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("doc", &self.doc)
            .field("registry", &self.registry.len())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        let mut doc = Document::with_measurer(config.measurer);
        doc.set_viewport_width(config.viewport_width);
        let eids = match config.eid_seed {
            Some(seed) => EidGenerator::seeded(seed),
            None => EidGenerator::new(),
        };
        Self {
            doc,
            registry: Registry::new(),
            eids,
            frames: FrameQueue::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn body(&self) -> NodeKey {
        self.doc.body()
    }

    /// Create, mark, configure and register a wrapped `tag` element.
    pub fn create_element(
        &mut self,
        tag: &str,
        args: impl IntoIterator<Item = ElementArg>,
    ) -> Result<Eid, BuildError> {
        let node = self.doc.create_element(tag).map_err(|err| {
            log::error!(target: "elements.ui", "cannot create element: {err}");
            BuildError::InvalidTag(tag.to_string())
        })?;
        let tag = self.doc.tag_name(node).unwrap_or(tag).to_string();
        let eid = self.eids.next_eid();
        match marker::encode(eid) {
            Ok(raw) => {
                if let Err(err) = self.doc.set_attribute(node, marker::MARKER_ATTRIBUTE, &raw) {
                    log::warn!(target: "elements.ui", "{eid}: cannot write marker: {err}");
                }
            }
            Err(err) => log::warn!(target: "elements.ui", "{eid}: cannot encode marker: {err}"),
        }
        // Registered up front so `Children` can resolve this element as parent.
        self.registry.insert(LibElement::new(eid, &tag, node));

        let mut element = ElementMut::new(self, eid, node);
        for arg in args {
            match arg {
                ElementArg::Parent(parent) => {
                    if let Err(err) = element.set_parent(Some(parent)) {
                        log::warn!(target: "elements.ui", "{eid}: cannot attach: {err}");
                    }
                }
                ElementArg::Mount(node) => {
                    element.mount(node);
                }
                ElementArg::Event(name, listener) => {
                    element.add_event_listener(&name, listener);
                }
                ElementArg::Text(text) => {
                    element.set_text(&text);
                }
                ElementArg::Children(children) => {
                    for child in children {
                        if let Err(err) = element.ui.attach(child, ParentRef::Element(eid)) {
                            log::warn!(target: "elements.ui", "{eid}: cannot adopt {child}: {err}");
                        }
                    }
                }
                ElementArg::Attributes(pairs) => {
                    element.set_attributes(pairs);
                }
            }
        }
        log::debug!(target: "elements.ui", "created <{tag}> {eid}");
        Ok(eid)
    }

    /// Registered wrapper for `eid`.
    pub fn get(&self, eid: Eid) -> Option<&LibElement> {
        self.registry.get(eid)
    }

    /// Wrapper whose marker sits on `node`.
    pub fn get_by_node(&self, node: NodeKey) -> Option<&LibElement> {
        marker::read(&self.doc, node).and_then(|eid| self.registry.get(eid))
    }

    /// Mutable handle to a registered wrapper.
    pub fn element(&mut self, eid: Eid) -> Option<ElementMut<'_>> {
        let node = self.registry.get(eid)?.node;
        Some(ElementMut::new(self, eid, node))
    }

    /// Drawing handle for a registered canvas wrapper.
    pub fn canvas(&mut self, eid: Eid) -> Option<CanvasMut<'_>> {
        let record = self.registry.get(eid)?;
        if !record.is_canvas() {
            return None;
        }
        let node = record.node;
        Some(CanvasMut::new(self, eid, node))
    }

    /// Dispatch `name` at the wrapper's node.
    pub fn dispatch(&self, eid: Eid, name: &str) -> Option<usize> {
        let node = self.registry.get(eid)?.node;
        match self.doc.dispatch_event(node, name) {
            Ok(invoked) => Some(invoked),
            Err(err) => {
                log::warn!(target: "elements.ui", "{eid}: dispatch {name} failed: {err}");
                None
            }
        }
    }

    /// Run everything queued for this frame; returns how many callbacks ran.
    pub fn run_frame(&mut self, now: FrameTime) -> usize {
        let due = self.frames.begin_frame();
        let ran = due.len();
        for callback in due {
            callback(self, now);
        }
        ran
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    /// Remove every wrapper and drop queued frame callbacks.
    pub fn teardown(&mut self) {
        for eid in self.registry.eids() {
            if self.registry.contains(eid) {
                self.remove_element(eid);
            }
        }
        drop(self.frames.begin_frame());
        log::debug!(target: "elements.ui", "teardown complete");
    }

    /// Remove wrapper descendants, free the node and unregister `eid`.
    pub(crate) fn remove_element(&mut self, eid: Eid) {
        let Some(node) = self.registry.get(eid).map(LibElement::node) else {
            return;
        };
        self.clear_node(node);
        if let Err(err) = self.doc.destroy(node) {
            log::warn!(target: "elements.ui", "{eid}: cannot destroy {node}: {err}");
        }
        if let Some(drawing) = self.registry.remove(eid).and_then(|r| r.drawing) {
            drawing.stop_all();
        }
        log::debug!(target: "elements.ui", "removed {eid}");
    }

    /// Append `eid`'s node beneath `parent`, recording ownership for wrappers.
    pub(crate) fn attach(&mut self, eid: Eid, parent: ParentRef) -> Result<(), UiError> {
        let node = self.node_of(eid)?;
        let (parent_node, owner) = match parent {
            ParentRef::Element(owner) => (self.node_of(owner)?, Some(owner)),
            ParentRef::Node(parent_node) => (parent_node, None),
        };
        self.doc.append_child(parent_node, node)?;
        if let Some(record) = self.registry.get_mut(eid) {
            record.parent = owner;
        }
        Ok(())
    }

    fn node_of(&self, eid: Eid) -> Result<NodeKey, UiError> {
        self.registry
            .get(eid)
            .map(LibElement::node)
            .ok_or(UiError::UnknownElement(eid))
    }

    /// Empty `node`: marked wrapper children are removed, plain elements
    /// detached, text and markup freed.
    pub(crate) fn clear_node(&mut self, node: NodeKey) {
        while let Some(child) = self.doc.first_child(node) {
            match marker::read(&self.doc, child) {
                Some(eid) if self.registry.get(eid).is_some_and(|r| r.node == child) => {
                    self.remove_element(eid);
                }
                Some(eid) => {
                    log::warn!(target: "elements.ui", "{child} carries unregistered id {eid}");
                }
                None => {}
            }
            if self.doc.first_child(node) == Some(child) {
                // Text and markup are unreachable once detached.
                let result = if self.doc.tag_name(child).is_some() {
                    self.doc.detach(child)
                } else {
                    self.doc.destroy(child)
                };
                if let Err(err) = result {
                    log::warn!(target: "elements.ui", "cannot detach {child}: {err}");
                    break;
                }
            }
        }
    }
}
