use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use core_types::Rect;

use crate::canvas::Canvas;
use crate::error::DomError;
use crate::text::{MonospaceMeasurer, TextMeasurer};
use crate::types::{ElementData, Event, Listener, NodeKey, NodeKind, NodeRecord};

pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

/// In-memory retained element tree.
///
/// Nodes live in a keyed arena; parent/child links are keys. A fresh document
/// has a document root with a single `<body>` element under it.
pub struct Document {
    nodes: HashMap<NodeKey, NodeRecord>,
    next_key: u32,
    root: NodeKey,
    body: NodeKey,
    viewport_width: f32,
    measurer: Box<dyn TextMeasurer>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("body", &self.body)
            .field("viewport_width", &self.viewport_width)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_measurer(Box::new(MonospaceMeasurer::default()))
    }

    pub fn with_measurer(measurer: Box<dyn TextMeasurer>) -> Self {
        let mut nodes = HashMap::new();
        let root = NodeKey(1);
        let body = NodeKey(2);
        let mut root_record = NodeRecord::new(NodeKind::Document);
        root_record.children.push(body);
        let mut body_record = NodeRecord::new(NodeKind::Element(ElementData::new(Arc::from("body"))));
        body_record.parent = Some(root);
        nodes.insert(root, root_record);
        nodes.insert(body, body_record);
        Self {
            nodes,
            next_key: 3,
            root,
            body,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            measurer,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn body(&self) -> NodeKey {
        self.body
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
    }

    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
    }

    /// Number of live nodes, root and body included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    // ---------------------------------------------------------------------
    // Creation
    // ---------------------------------------------------------------------

    /// Create a detached element. Tag names are canonicalised to lowercase.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeKey, DomError> {
        if !is_valid_tag_name(tag) {
            return Err(DomError::InvalidTagName(tag.to_string()));
        }
        let name: Arc<str> = Arc::from(tag.to_ascii_lowercase());
        Ok(self.insert(NodeKind::Element(ElementData::new(name))))
    }

    pub fn create_text(&mut self, text: &str) -> NodeKey {
        self.insert(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn insert(&mut self, kind: NodeKind) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(key, NodeRecord::new(kind));
        key
    }

    // ---------------------------------------------------------------------
    // Tree structure
    // ---------------------------------------------------------------------

    pub fn tag_name(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(&key)?.element().map(|e| &*e.name)
    }

    pub fn is_element(&self, key: NodeKey) -> bool {
        self.nodes.get(&key).is_some_and(|n| n.element().is_some())
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(&key)?.parent
    }

    /// Children of `key` in order; empty for unknown or leaf nodes.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(&key)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).first().copied()
    }

    pub fn has_child_nodes(&self, key: NodeKey) -> bool {
        !self.children(key).is_empty()
    }

    /// `true` when `key` sits somewhere under the document root.
    pub fn is_connected(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == self.root {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it out of its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        self.ensure_live(parent)?;
        self.ensure_live(child)?;
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if !self.record(parent)?.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        self.detach(child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink `key` from its parent. The node and its subtree stay live.
    pub fn detach(&mut self, key: NodeKey) -> Result<(), DomError> {
        let Some(parent) = self.record_mut(key)?.parent.take() else {
            return Ok(());
        };
        if let Some(record) = self.nodes.get_mut(&parent) {
            record.children.retain(|k| *k != key);
        }
        Ok(())
    }

    /// Detach `key` and free it together with its whole subtree.
    pub fn destroy(&mut self, key: NodeKey) -> Result<(), DomError> {
        if key == self.root || key == self.body {
            return Err(DomError::InvalidParent(key));
        }
        self.detach(key)?;
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(record) = self.nodes.remove(&current) {
                stack.extend(record.children);
            }
        }
        Ok(())
    }

    fn is_descendant(&self, ancestor: NodeKey, maybe_descendant: NodeKey) -> bool {
        let mut stack: Vec<NodeKey> = self.children(ancestor).to_vec();
        while let Some(current) = stack.pop() {
            if current == maybe_descendant {
                return true;
            }
            stack.extend_from_slice(self.children(current));
        }
        false
    }

    fn replace_children(&mut self, key: NodeKey, kind: NodeKind) -> Result<(), DomError> {
        if !self.record(key)?.allows_children() {
            return Err(DomError::InvalidParent(key));
        }
        // Text and markup children are only reachable through `key`, so they
        // are freed. Element children may still be held by the caller and
        // are detached.
        let old = std::mem::take(&mut self.record_mut(key)?.children);
        for child in old {
            let Some(record) = self.nodes.get_mut(&child) else {
                continue;
            };
            if record.element().is_some() {
                record.parent = None;
            } else {
                self.nodes.remove(&child);
            }
        }
        let new_child = self.insert(kind);
        self.record_mut(new_child)?.parent = Some(key);
        self.record_mut(key)?.children.push(new_child);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    /// Replace all children with a single raw markup node.
    pub fn set_inner_html(&mut self, key: NodeKey, html: &str) -> Result<(), DomError> {
        self.replace_children(
            key,
            NodeKind::Markup {
                html: html.to_string(),
            },
        )
    }

    /// Replace all children with a single text node.
    pub fn set_text_content(&mut self, key: NodeKey, text: &str) -> Result<(), DomError> {
        self.replace_children(
            key,
            NodeKind::Text {
                text: text.to_string(),
            },
        )
    }

    /// Concatenated text and markup of the subtree, in tree order.
    pub fn text_content(&self, key: NodeKey) -> String {
        let mut out = String::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(record) = self.nodes.get(&current) else {
                continue;
            };
            match &record.kind {
                NodeKind::Text { text } => out.push_str(text),
                NodeKind::Markup { html } => out.push_str(html),
                NodeKind::Document | NodeKind::Element(_) => {
                    stack.extend(record.children.iter().rev().copied());
                }
            }
        }
        out
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    pub fn attribute(&self, key: NodeKey, name: &str) -> Option<&str> {
        self.nodes.get(&key)?.element()?.attribute(name)
    }

    pub fn has_attribute(&self, key: NodeKey, name: &str) -> bool {
        self.attribute(key, name).is_some()
    }

    pub fn attributes(&self, key: NodeKey) -> &[(Arc<str>, String)] {
        self.nodes
            .get(&key)
            .and_then(|n| n.element())
            .map(|e| e.attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_attribute(&mut self, key: NodeKey, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(key)?.set_attribute(name, value);
        Ok(())
    }

    /// Returns `true` if the attribute was present.
    pub fn remove_attribute(&mut self, key: NodeKey, name: &str) -> Result<bool, DomError> {
        Ok(self.element_mut(key)?.remove_attribute(name))
    }

    pub fn has_class(&self, key: NodeKey, class: &str) -> bool {
        self.attribute(key, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Toggle `class` in the class list; returns whether it is now present.
    pub fn toggle_class(&mut self, key: NodeKey, class: &str) -> Result<bool, DomError> {
        let element = self.element_mut(key)?;
        let mut classes: Vec<String> = element
            .attribute("class")
            .map(|list| list.split_ascii_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let present = if let Some(pos) = classes.iter().position(|c| c == class) {
            classes.remove(pos);
            false
        } else {
            classes.push(class.to_string());
            true
        };
        element.set_attribute("class", &classes.join(" "));
        Ok(present)
    }

    // ---------------------------------------------------------------------
    // Inline style
    // ---------------------------------------------------------------------

    pub fn style(&self, key: NodeKey, property: &str) -> Option<&str> {
        self.nodes
            .get(&key)?
            .element()?
            .style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, key: NodeKey, property: &str, value: &str) -> Result<(), DomError> {
        let style = &mut self.element_mut(key)?.style;
        if let Some((_, v)) = style.iter_mut().find(|(k, _)| k == property) {
            *v = value.to_string();
        } else {
            style.push((property.to_string(), value.to_string()));
        }
        Ok(())
    }

    /// Inline style serialised as `name: value;` pairs.
    pub fn style_text(&self, key: NodeKey) -> String {
        let Some(element) = self.nodes.get(&key).and_then(|n| n.element()) else {
            return String::new();
        };
        element
            .style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ---------------------------------------------------------------------
    // Form state
    // ---------------------------------------------------------------------

    pub fn value(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(&key)?.element()?.value.as_deref()
    }

    pub fn set_value(&mut self, key: NodeKey, value: &str) -> Result<(), DomError> {
        self.element_mut(key)?.value = Some(value.to_string());
        Ok(())
    }

    pub fn is_checked(&self, key: NodeKey) -> bool {
        self.nodes
            .get(&key)
            .and_then(|n| n.element())
            .is_some_and(|e| e.checked)
    }

    pub fn set_checked(&mut self, key: NodeKey, checked: bool) -> Result<(), DomError> {
        self.element_mut(key)?.checked = checked;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    pub fn add_event_listener(
        &mut self,
        key: NodeKey,
        name: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.element_mut(key)?
            .listeners
            .push((Arc::from(name), listener));
        Ok(())
    }

    /// Drop every listener registered for `name`; returns how many were removed.
    pub fn remove_event_listeners(&mut self, key: NodeKey, name: &str) -> Result<usize, DomError> {
        let listeners = &mut self.element_mut(key)?.listeners;
        let before = listeners.len();
        listeners.retain(|(n, _)| &**n != name);
        Ok(before - listeners.len())
    }

    pub fn listener_count(&self, key: NodeKey, name: &str) -> usize {
        self.nodes
            .get(&key)
            .and_then(|n| n.element())
            .map(|e| e.listeners.iter().filter(|(n, _)| &**n == name).count())
            .unwrap_or(0)
    }

    /// Dispatch `name` at `target`, bubbling to ancestors until a listener
    /// stops propagation. Returns the number of listeners invoked.
    pub fn dispatch_event(&self, target: NodeKey, name: &str) -> Result<usize, DomError> {
        self.ensure_live(target)?;
        let event = Event::new(name, target);
        let mut invoked = 0;
        let mut current = Some(target);
        while let Some(key) = current {
            let listeners: Vec<Listener> = self
                .nodes
                .get(&key)
                .and_then(|n| n.element())
                .map(|e| {
                    e.listeners
                        .iter()
                        .filter(|(n, _)| &**n == name)
                        .map(|(_, l)| Listener::clone(l))
                        .collect()
                })
                .unwrap_or_default();
            event.set_current_target(key);
            for l in listeners {
                l(&event);
                invoked += 1;
            }
            if event.is_propagation_stopped() {
                break;
            }
            current = self.parent(key);
        }
        log::trace!(target: "dom.events", "dispatched {name} at {target}: {invoked} listener(s)");
        Ok(invoked)
    }

    // ---------------------------------------------------------------------
    // Canvas
    // ---------------------------------------------------------------------

    pub fn canvas(&self, key: NodeKey) -> Result<&Canvas, DomError> {
        self.record(key)?
            .element()
            .and_then(|e| e.canvas.as_ref())
            .ok_or(DomError::NotACanvas(key))
    }

    pub fn canvas_mut(&mut self, key: NodeKey) -> Result<&mut Canvas, DomError> {
        self.record_mut(key)?
            .element_mut()
            .and_then(|e| e.canvas.as_mut())
            .ok_or(DomError::NotACanvas(key))
    }

    /// Width of `text` in the canvas' current font.
    pub fn measure_text(&self, key: NodeKey, text: &str) -> Result<f32, DomError> {
        let canvas = self.canvas(key)?;
        Ok(self.measurer.measure(text, &canvas.context.font))
    }

    // ---------------------------------------------------------------------
    // Geometry / debug
    // ---------------------------------------------------------------------

    /// Block-layout rectangle of a connected node.
    pub fn bounds(&self, key: NodeKey) -> Option<Rect> {
        crate::layout::bounds_of(self, key)
    }

    pub fn outline(&self, cap: usize) -> Vec<String> {
        crate::debug::outline(self, self.root, cap)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    pub(crate) fn record(&self, key: NodeKey) -> Result<&NodeRecord, DomError> {
        self.nodes.get(&key).ok_or(DomError::UnknownNode(key))
    }

    fn record_mut(&mut self, key: NodeKey) -> Result<&mut NodeRecord, DomError> {
        self.nodes.get_mut(&key).ok_or(DomError::UnknownNode(key))
    }

    fn element_mut(&mut self, key: NodeKey) -> Result<&mut ElementData, DomError> {
        self.record_mut(key)?
            .element_mut()
            .ok_or(DomError::NotAnElement(key))
    }

    fn ensure_live(&self, key: NodeKey) -> Result<(), DomError> {
        self.record(key).map(|_| ())
    }
}

/// ASCII letter first, then letters, digits or `-` (custom elements).
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut bytes = tag.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    first.is_ascii_alphabetic() && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fresh_document_has_root_and_body() {
        let doc = Document::new();
        assert_eq!(doc.children(doc.root()), &[doc.body()]);
        assert_eq!(doc.tag_name(doc.body()), Some("body"));
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn create_element_validates_and_lowercases() {
        let mut doc = Document::new();
        let div = doc.create_element("DIV").unwrap();
        assert_eq!(doc.tag_name(div), Some("div"));
        assert!(doc.create_element("my-widget").is_ok());
        assert_eq!(
            doc.create_element(""),
            Err(DomError::InvalidTagName(String::new()))
        );
        assert!(doc.create_element("1div").is_err());
        assert!(doc.create_element("di v").is_err());
    }

    #[test]
    fn append_child_moves_between_parents() {
        let mut doc = Document::new();
        let a = doc.create_element("div").unwrap();
        let b = doc.create_element("div").unwrap();
        let c = doc.create_element("span").unwrap();
        doc.append_child(a, c).unwrap();
        doc.append_child(b, c).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[c]);
        assert_eq!(doc.parent(c), Some(b));
    }

    #[test]
    fn append_child_rejects_cycles_and_leaf_parents() {
        let mut doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("div").unwrap();
        doc.append_child(outer, inner).unwrap();
        assert_eq!(
            doc.append_child(inner, outer),
            Err(DomError::CycleDetected {
                parent: inner,
                child: outer
            })
        );
        assert!(doc.append_child(outer, outer).is_err());

        let text = doc.create_text("hi");
        assert_eq!(
            doc.append_child(text, inner),
            Err(DomError::InvalidParent(text))
        );
    }

    #[test]
    fn destroy_frees_subtree_and_never_reuses_keys() {
        let mut doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("p").unwrap();
        doc.append_child(doc.body(), outer).unwrap();
        doc.append_child(outer, inner).unwrap();

        doc.destroy(outer).unwrap();
        assert!(!doc.contains(outer));
        assert!(!doc.contains(inner));
        assert!(doc.children(doc.body()).is_empty());

        let next = doc.create_element("div").unwrap();
        assert!(next.0 > inner.0);
    }

    #[test]
    fn body_cannot_be_destroyed() {
        let mut doc = Document::new();
        let body = doc.body();
        assert!(doc.destroy(body).is_err());
    }

    #[test]
    fn inner_html_and_text_replace_children() {
        let mut doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let child = doc.create_element("span").unwrap();
        doc.append_child(div, child).unwrap();

        doc.set_inner_html(div, "<b>bold</b>").unwrap();
        assert_eq!(doc.children(div).len(), 1);
        assert_eq!(doc.parent(child), None);
        assert_eq!(doc.text_content(div), "<b>bold</b>");

        doc.set_text_content(div, "plain").unwrap();
        assert_eq!(doc.text_content(div), "plain");
        assert!(doc.contains(child));
    }

    #[test]
    fn replaced_text_nodes_are_freed() {
        let mut doc = Document::new();
        let p = doc.create_element("p").unwrap();
        doc.set_text_content(p, "0").unwrap();
        let before = doc.len();

        for i in 1..1000 {
            doc.set_text_content(p, &i.to_string()).unwrap();
        }
        doc.set_inner_html(p, "<i>done</i>").unwrap();

        assert_eq!(doc.len(), before);
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "<i>done</i>");
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut doc = Document::new();
        let a = doc.create_element("a").unwrap();
        doc.set_attribute(a, "href", "/one").unwrap();
        doc.set_attribute(a, "id", "link").unwrap();
        doc.set_attribute(a, "href", "/two").unwrap();
        let names: Vec<&str> = doc.attributes(a).iter().map(|(k, _)| &**k).collect();
        assert_eq!(names, vec!["href", "id"]);
        assert_eq!(doc.attribute(a, "href"), Some("/two"));
        assert_eq!(doc.remove_attribute(a, "href"), Ok(true));
        assert_eq!(doc.remove_attribute(a, "href"), Ok(false));
    }

    #[test]
    fn toggle_class_adds_then_removes() {
        let mut doc = Document::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(div, "class", "card  wide").unwrap();
        assert_eq!(doc.toggle_class(div, "active"), Ok(true));
        assert!(doc.has_class(div, "active"));
        assert_eq!(doc.toggle_class(div, "card"), Ok(false));
        assert_eq!(doc.attribute(div, "class"), Some("wide active"));
    }

    #[test]
    fn style_text_serialises_in_insertion_order() {
        let mut doc = Document::new();
        let div = doc.create_element("div").unwrap();
        doc.set_style(div, "color", "red").unwrap();
        doc.set_style(div, "width", "10px").unwrap();
        doc.set_style(div, "color", "blue").unwrap();
        assert_eq!(doc.style_text(div), "color: blue; width: 10px;");
    }

    #[test]
    fn dispatch_bubbles_until_stopped() {
        let mut doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("button").unwrap();
        doc.append_child(outer, inner).unwrap();

        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        let l = Rc::clone(&log);
        doc.add_event_listener(
            inner,
            "click",
            crate::listener(move |e| l.borrow_mut().push(format!("inner {}", e.current_target()))),
        )
        .unwrap();
        let l = Rc::clone(&log);
        doc.add_event_listener(
            outer,
            "click",
            crate::listener(move |e| l.borrow_mut().push(format!("outer {}", e.target()))),
        )
        .unwrap();

        assert_eq!(doc.dispatch_event(inner, "click"), Ok(2));
        assert_eq!(
            *log.borrow(),
            vec![format!("inner {inner}"), format!("outer {inner}")]
        );

        doc.add_event_listener(inner, "click", crate::listener(|e| e.stop_propagation()))
            .unwrap();
        assert_eq!(doc.dispatch_event(inner, "click"), Ok(2));
    }

    #[test]
    fn remove_event_listeners_drops_all_for_name() {
        let mut doc = Document::new();
        let b = doc.create_element("button").unwrap();
        doc.add_event_listener(b, "click", crate::listener(|_| {})).unwrap();
        doc.add_event_listener(b, "click", crate::listener(|_| {})).unwrap();
        doc.add_event_listener(b, "focus", crate::listener(|_| {})).unwrap();
        assert_eq!(doc.remove_event_listeners(b, "click"), Ok(2));
        assert_eq!(doc.listener_count(b, "click"), 0);
        assert_eq!(doc.listener_count(b, "focus"), 1);
    }

    #[test]
    fn only_canvas_elements_carry_a_context() {
        let mut doc = Document::new();
        let canvas = doc.create_element("canvas").unwrap();
        let div = doc.create_element("div").unwrap();
        assert!(doc.canvas(canvas).is_ok());
        assert_eq!(doc.canvas(div).err(), Some(DomError::NotACanvas(div)));
        assert!(doc.measure_text(canvas, "abc").unwrap() > 0.0);
    }
}
