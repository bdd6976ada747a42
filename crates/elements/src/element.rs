//! Mutable handle to one registered wrapper.
//!
//! Setters follow a partial-success rule: a surface error is logged and the
//! handle stays usable, so calls can be chained. Only [`ElementMut::set_parent`]
//! reports its error, since a rejected attach changes what the caller built.

use core_types::{Eid, Rect};
use dom::{DomError, Listener, NodeKey};

use crate::canvas::DrawingCapability;
use crate::error::UiError;
use crate::marker;
use crate::ui::{ParentRef, Ui};

pub struct ElementMut<'a> {
    pub(crate) ui: &'a mut Ui,
    eid: Eid,
    node: NodeKey,
}

impl<'a> ElementMut<'a> {
    pub(crate) fn new(ui: &'a mut Ui, eid: Eid, node: NodeKey) -> Self {
        Self { ui, eid, node }
    }

    pub fn eid(&self) -> Eid {
        self.eid
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn tag(&self) -> &str {
        self.ui.registry.get(self.eid).map_or("", |r| r.tag())
    }

    /// Owning wrapper, if any.
    pub fn parent(&self) -> Option<Eid> {
        self.ui.registry.get(self.eid).and_then(|r| r.parent())
    }

    fn report<T>(&self, what: &str, result: Result<T, DomError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!(target: "elements.element", "{} {what}: {err}", self.eid);
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Tree
    // ---------------------------------------------------------------------

    /// Attach beneath `parent`; `None` leaves the element where it is.
    pub fn set_parent(&mut self, parent: Option<ParentRef>) -> Result<(), UiError> {
        match parent {
            Some(parent) => self.ui.attach(self.eid, parent),
            None => Ok(()),
        }
    }

    /// Adopt `adopted` as the underlying node.
    ///
    /// Children of the previous node move to the adopted one, which also takes
    /// the previous node's parent when it has none of its own. The previous
    /// node is then destroyed.
    pub fn mount(&mut self, adopted: NodeKey) -> &mut Self {
        let old = self.node;
        if adopted == old {
            return self;
        }
        let Some(tag) = self.ui.doc.tag_name(adopted).map(str::to_string) else {
            log::warn!(target: "elements.element", "{}: cannot mount {adopted}: not an element", self.eid);
            return self;
        };
        if self.is_within(adopted, old) {
            log::warn!(target: "elements.element", "{}: cannot mount its own descendant {adopted}", self.eid);
            return self;
        }
        if let Some(owner) = marker::read(&self.ui.doc, adopted)
            .filter(|&owner| owner != self.eid)
            .filter(|&owner| self.ui.registry.get(owner).is_some_and(|r| r.node == adopted))
        {
            log::warn!(target: "elements.element", "{}: cannot mount {adopted}: owned by {owner}", self.eid);
            return self;
        }

        for child in self.ui.doc.children(old).to_vec() {
            let moved = self.ui.doc.append_child(adopted, child);
            self.report("move child on mount", moved);
        }
        if let (None, Some(parent)) = (self.ui.doc.parent(adopted), self.ui.doc.parent(old)) {
            let attached = self.ui.doc.append_child(parent, adopted);
            self.report("attach mounted node", attached);
        }
        let destroyed = self.ui.doc.destroy(old);
        self.report("destroy replaced node", destroyed);

        match marker::encode(self.eid) {
            Ok(raw) => {
                let marked = self.ui.doc.set_attribute(adopted, marker::MARKER_ATTRIBUTE, &raw);
                self.report("mark mounted node", marked);
            }
            Err(err) => log::warn!(target: "elements.element", "{}: cannot encode marker: {err}", self.eid),
        }

        let is_canvas = tag == "canvas";
        if let Some(record) = self.ui.registry.get_mut(self.eid) {
            record.node = adopted;
            record.tag = tag;
            if !is_canvas {
                if let Some(drawing) = record.drawing.take() {
                    drawing.stop_all();
                }
            } else if record.drawing.is_none() {
                record.drawing = Some(DrawingCapability::default());
            }
        }
        self.node = adopted;
        log::debug!(target: "elements.element", "{} mounted {adopted} in place of {old}", self.eid);
        self
    }

    fn is_within(&self, key: NodeKey, ancestor: NodeKey) -> bool {
        let mut current = self.ui.doc.parent(key);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.ui.doc.parent(node);
        }
        false
    }

    /// Remove wrapper descendants, free the node and unregister.
    pub fn remove(self) {
        self.ui.remove_element(self.eid);
    }

    /// Empty the element; wrapped children are removed, plain ones detached.
    pub fn clear(&mut self) -> &mut Self {
        self.ui.clear_node(self.node);
        self
    }

    /// Registered wrapper children, in tree order.
    pub fn children(&self) -> Vec<Eid> {
        let doc = &self.ui.doc;
        doc.children(self.node)
            .iter()
            .filter_map(|&child| marker::read(doc, child))
            .filter(|&eid| self.ui.registry.contains(eid))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    /// Replace the children with raw markup. Wrapped children are removed
    /// first, plain ones detached.
    pub fn set_content(&mut self, html: &str) -> &mut Self {
        self.ui.clear_node(self.node);
        let result = self.ui.doc.set_inner_html(self.node, html);
        self.report("set content", result);
        self
    }

    /// Replace the children with a single text node, the way
    /// [`ElementMut::set_content`] does.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.ui.clear_node(self.node);
        let result = self.ui.doc.set_text_content(self.node, text);
        self.report("set text", result);
        self
    }

    pub fn text_content(&self) -> String {
        self.ui.doc.text_content(self.node)
    }

    // ---------------------------------------------------------------------
    // Style
    // ---------------------------------------------------------------------

    /// Apply inline style properties. Absent or empty values are skipped.
    pub fn style<'s>(&mut self, props: impl IntoIterator<Item = (&'s str, Option<&'s str>)>) -> &mut Self {
        for (name, value) in props {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            let result = self.ui.doc.set_style(self.node, name, value);
            self.report("set style", result);
        }
        self
    }

    pub fn get_style(&self, name: &str) -> Option<&str> {
        self.ui.doc.style(self.node, name)
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.ui.doc.bounds(self.node)
    }

    pub fn computed_style_text(&self) -> String {
        self.ui.doc.style_text(self.node)
    }

    // ---------------------------------------------------------------------
    // Form state
    // ---------------------------------------------------------------------

    pub fn set_value(&mut self, value: &str) -> &mut Self {
        let result = self.ui.doc.set_value(self.node, value);
        self.report("set value", result);
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.ui.doc.value(self.node)
    }

    pub fn set_checked(&mut self, checked: Option<bool>) -> &mut Self {
        let result = self.ui.doc.set_checked(self.node, checked.unwrap_or(false));
        self.report("set checked", result);
        self
    }

    pub fn is_checked(&self) -> bool {
        self.ui.doc.is_checked(self.node)
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    pub fn set_id(&mut self, id: &str) -> &mut Self {
        self.set_attributes([("id", id)])
    }

    pub fn set_class_name(&mut self, class: &str) -> &mut Self {
        self.set_attributes([("class", class)])
    }

    pub fn toggle_class(&mut self, class: &str) -> &mut Self {
        let result = self.ui.doc.toggle_class(self.node, class);
        self.report("toggle class", result);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.ui.doc.has_class(self.node, class)
    }

    /// Set every pair verbatim; names are not filtered.
    pub fn set_attributes<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in pairs {
            let result = self
                .ui
                .doc
                .set_attribute(self.node, name.as_ref(), value.as_ref());
            self.report("set attribute", result);
        }
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.ui.doc.attribute(self.node, name)
    }

    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        let result = self.ui.doc.remove_attribute(self.node, name);
        self.report("remove attribute", result);
        self
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    pub fn add_event_listener(&mut self, name: &str, listener: Listener) -> &mut Self {
        let result = self.ui.doc.add_event_listener(self.node, name, listener);
        self.report("add listener", result);
        self
    }

    /// Drop every listener for `name`.
    pub fn remove_event_listener(&mut self, name: &str) -> &mut Self {
        let result = self.ui.doc.remove_event_listeners(self.node, name);
        if let Some(removed) = self.report("remove listeners", result) {
            log::trace!(target: "elements.element", "{}: removed {removed} {name} listener(s)", self.eid);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use dom_test_support::Probe;

    use crate::ui::{ElementArg, UiConfig};

    use super::*;

    fn ui() -> Ui {
        Ui::with_config(UiConfig::default().eid_seed(3))
    }

    #[test]
    fn style_skips_absent_and_empty_values() {
        let mut ui = ui();
        let eid = ui.create_element("div", []).unwrap();
        let mut el = ui.element(eid).unwrap();
        el.style([("color", Some("red")), ("margin", Some("4px"))]);
        el.style([("color", None), ("margin", Some(""))]);

        assert_eq!(el.get_style("color"), Some("red"));
        assert_eq!(el.get_style("margin"), Some("4px"));
        assert_eq!(el.computed_style_text(), "color: red; margin: 4px;");
    }

    #[test]
    fn attribute_helpers() {
        let mut ui = ui();
        let eid = ui.create_element("p", []).unwrap();
        let mut el = ui.element(eid).unwrap();
        el.set_id("intro").set_class_name("lead");
        el.toggle_class("muted").toggle_class("lead");
        el.set_attributes([("title", "hi"), ("notarealattr", "kept")]);
        el.remove_attribute("title");

        assert_eq!(el.attribute("id"), Some("intro"));
        assert_eq!(el.attribute("class"), Some("muted"));
        assert!(el.has_class("muted"));
        assert_eq!(el.attribute("notarealattr"), Some("kept"));
        assert_eq!(el.attribute("title"), None);
    }

    #[test]
    fn form_state() {
        let mut ui = ui();
        let eid = ui.create_element("input", []).unwrap();
        let mut el = ui.element(eid).unwrap();
        el.set_value("42").set_checked(Some(true));
        assert_eq!(el.value(), Some("42"));
        assert!(el.is_checked());
        el.set_checked(None);
        assert!(!el.is_checked());
    }

    #[test]
    fn content_and_text_replace_children() {
        let mut ui = ui();
        let eid = ui.create_element("div", []).unwrap();
        let mut el = ui.element(eid).unwrap();
        el.set_content("<b>bold</b>");
        assert_eq!(el.text_content(), "<b>bold</b>");
        el.set_text("plain");
        assert_eq!(el.text_content(), "plain");
        assert_eq!(ui.document().children(ui.get(eid).unwrap().node()).len(), 1);
    }

    #[test]
    fn replacing_content_removes_wrapped_children() {
        let mut ui = ui();
        let parent = ui.create_element("div", []).unwrap();
        let child = ui
            .create_element("span", [ElementArg::parent(parent)])
            .unwrap();
        let child_node = ui.get(child).unwrap().node();

        ui.element(parent).unwrap().set_text("replaced");

        assert!(ui.get(child).is_none());
        assert!(!ui.document().contains(child_node));
        assert_eq!(ui.registry().len(), 1);

        let other = ui
            .create_element("b", [ElementArg::parent(parent)])
            .unwrap();
        ui.element(parent).unwrap().set_content("<i>markup</i>");
        assert!(ui.get(other).is_none());

        ui.element(parent).unwrap().remove();
        assert!(ui.registry().is_empty());
    }

    #[test]
    fn repeated_text_updates_do_not_grow_the_document() {
        let mut ui = ui();
        let eid = ui.create_element("p", [ElementArg::text("0")]).unwrap();
        let before = ui.document().len();

        for i in 1..1000 {
            ui.element(eid).unwrap().set_text(&i.to_string());
        }

        assert_eq!(ui.document().len(), before);
        assert_eq!(ui.element(eid).unwrap().text_content(), "999");
    }

    #[test]
    fn listeners_can_be_added_and_removed() {
        let mut ui = ui();
        let probe = Probe::new();
        let eid = ui.create_element("button", []).unwrap();
        ui.element(eid)
            .unwrap()
            .add_event_listener("click", dom::listener(probe.callback::<dom::Event>()));

        assert_eq!(ui.dispatch(eid, "click"), Some(1));
        ui.element(eid).unwrap().remove_event_listener("click");
        assert_eq!(ui.dispatch(eid, "click"), Some(0));
        assert_eq!(probe.count(), 1);
    }

    #[test]
    fn set_parent_none_is_a_no_op_and_cycles_are_rejected() {
        let mut ui = ui();
        let outer = ui.create_element("div", []).unwrap();
        let inner = ui
            .create_element("div", [ElementArg::parent(outer)])
            .unwrap();

        let mut el = ui.element(outer).unwrap();
        assert_eq!(el.set_parent(None), Ok(()));
        assert!(matches!(
            el.set_parent(Some(ParentRef::Element(inner))),
            Err(UiError::Dom(DomError::CycleDetected { .. }))
        ));
        assert_eq!(el.parent(), None);
        assert_eq!(el.children(), vec![inner]);
    }

    #[test]
    fn set_parent_to_unknown_wrapper_fails() {
        let mut ui = ui();
        let eid = ui.create_element("div", []).unwrap();
        let ghost = Eid::new(1, 999);
        assert_eq!(
            ui.element(eid).unwrap().set_parent(Some(ghost.into())),
            Err(UiError::UnknownElement(ghost))
        );
    }

    #[test]
    fn reparenting_moves_the_node() {
        let mut ui = ui();
        let a = ui.create_element("div", []).unwrap();
        let b = ui.create_element("div", []).unwrap();
        let child = ui.create_element("p", [ElementArg::parent(a)]).unwrap();

        ui.element(child).unwrap().set_parent(Some(b.into())).unwrap();

        assert!(ui.element(a).unwrap().children().is_empty());
        assert_eq!(ui.element(b).unwrap().children(), vec![child]);
        assert_eq!(ui.get(child).unwrap().parent(), Some(b));
    }

    #[test]
    fn mount_adopts_node_and_keeps_reverse_lookup() {
        let mut ui = ui();
        let body = ui.body();
        let existing = ui.document_mut().create_element("nav").unwrap();
        let eid = ui
            .create_element(
                "div",
                [ElementArg::parent(body), ElementArg::text("links")],
            )
            .unwrap();
        let old = ui.get(eid).unwrap().node();

        ui.element(eid).unwrap().mount(existing);

        let record = ui.get(eid).unwrap();
        assert_eq!(record.node(), existing);
        assert_eq!(record.tag(), "nav");
        assert!(!ui.document().contains(old));
        assert_eq!(ui.document().parent(existing), Some(body));
        assert_eq!(ui.document().text_content(existing), "links");
        assert_eq!(ui.get_by_node(existing).map(|r| r.eid()), Some(eid));
    }

    #[test]
    fn mount_rejects_text_nodes_and_own_descendants() {
        let mut ui = ui();
        let eid = ui.create_element("div", [ElementArg::text("x")]).unwrap();
        let node = ui.get(eid).unwrap().node();
        let text = ui.document().children(node)[0];
        let stray = ui.document_mut().create_text("stray");

        ui.element(eid).unwrap().mount(text).mount(stray);

        assert_eq!(ui.get(eid).unwrap().node(), node);
        assert!(ui.document().contains(text));
    }

    #[test]
    fn mount_refuses_a_node_owned_by_another_wrapper() {
        let mut ui = ui();
        let a = ui.create_element("div", []).unwrap();
        let b = ui.create_element("div", []).unwrap();
        let a_node = ui.get(a).unwrap().node();
        let b_node = ui.get(b).unwrap().node();

        ui.element(b).unwrap().mount(a_node);

        assert_eq!(ui.get(b).unwrap().node(), b_node);
        assert_eq!(marker::read(ui.document(), a_node), Some(a));
        assert_eq!(ui.get_by_node(a_node).map(|r| r.eid()), Some(a));

        ui.element(b).unwrap().remove();
        assert!(ui.get(a).is_some());
        assert!(ui.document().contains(a_node));
    }

    #[test]
    fn mounting_a_canvas_grants_drawing() {
        let mut ui = ui();
        let eid = ui.create_element("div", []).unwrap();
        assert!(ui.canvas(eid).is_none());
        let surface = ui.document_mut().create_element("canvas").unwrap();
        ui.element(eid).unwrap().mount(surface);
        assert!(ui.canvas(eid).is_some());
    }

    #[test]
    fn bounds_follow_block_layout() {
        let mut ui = ui();
        let body = ui.body();
        let eid = ui
            .create_element("div", [ElementArg::parent(body), ElementArg::text("hi")])
            .unwrap();
        let el = ui.element(eid).unwrap();
        assert_eq!(el.bounds(), Some(Rect::new(0.0, 24.0, 800.0, 48.0)));
    }
}
