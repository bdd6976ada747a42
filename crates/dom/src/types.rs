use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::canvas::Canvas;

/// Stable identity of a node inside one [`Document`](crate::Document).
///
/// Keys are allocated monotonically and never reused, so a key held after its
/// node was destroyed simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Event listener callback.
///
/// Listeners are reference counted so dispatch can snapshot the list and run
/// callbacks without holding a borrow of the document.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Wrap a closure as a [`Listener`].
pub fn listener(f: impl Fn(&Event) + 'static) -> Listener {
    Rc::new(f)
}

/// An event as seen by a listener.
#[derive(Debug)]
pub struct Event {
    name: Arc<str>,
    target: NodeKey,
    current_target: Cell<NodeKey>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    pub(crate) fn new(name: &str, target: NodeKey) -> Self {
        Self {
            name: Arc::from(name),
            target,
            current_target: Cell::new(target),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node the event was dispatched on.
    pub fn target(&self) -> NodeKey {
        self.target
    }

    /// Node whose listener is currently running (differs from `target` while bubbling).
    pub fn current_target(&self) -> NodeKey {
        self.current_target.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub(crate) fn set_current_target(&self, key: NodeKey) {
        self.current_target.set(key);
    }

    pub(crate) fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

pub(crate) enum NodeKind {
    Document,
    Element(ElementData),
    Text { text: String },
    /// Inner markup stored verbatim; the host renders it as-is.
    Markup { html: String },
}

pub(crate) struct ElementData {
    pub(crate) name: Arc<str>,
    pub(crate) attributes: Vec<(Arc<str>, String)>,
    pub(crate) style: Vec<(String, String)>,
    pub(crate) value: Option<String>,
    pub(crate) checked: bool,
    pub(crate) listeners: Vec<(Arc<str>, Listener)>,
    pub(crate) canvas: Option<Canvas>,
}

impl ElementData {
    pub(crate) fn new(name: Arc<str>) -> Self {
        let canvas = (&*name == "canvas").then(Canvas::default);
        Self {
            name,
            attributes: Vec::new(),
            style: Vec::new(),
            value: None,
            checked: false,
            listeners: Vec::new(),
            canvas,
        }
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace in place so attribute order stays stable; append when new.
    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some((_, v)) = self
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            v.clear();
            v.push_str(value);
            return;
        }
        self.attributes.push((Arc::from(name), value.to_string()));
    }

    pub(crate) fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        before != self.attributes.len()
    }
}

pub(crate) struct NodeRecord {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl NodeRecord {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element(_))
    }

    pub(crate) fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }
}
