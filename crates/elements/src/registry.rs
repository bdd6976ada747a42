use std::collections::HashMap;

use core_types::Eid;
use dom::NodeKey;

use crate::canvas::DrawingCapability;

/// Bookkeeping for one wrapped element.
#[derive(Debug)]
pub struct LibElement {
    pub(crate) eid: Eid,
    pub(crate) tag: String,
    pub(crate) node: NodeKey,
    /// Owning wrapper, if the element was attached through one.
    pub(crate) parent: Option<Eid>,
    pub(crate) drawing: Option<DrawingCapability>,
}

impl LibElement {
    pub(crate) fn new(eid: Eid, tag: &str, node: NodeKey) -> Self {
        Self {
            eid,
            tag: tag.to_string(),
            node,
            parent: None,
            drawing: (tag == "canvas").then(DrawingCapability::default),
        }
    }

    pub fn eid(&self) -> Eid {
        self.eid
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn parent(&self) -> Option<Eid> {
        self.parent
    }

    pub fn is_canvas(&self) -> bool {
        self.drawing.is_some()
    }
}

/// Live wrappers keyed by id.
#[derive(Debug, Default)]
pub struct Registry {
    elements: HashMap<Eid, LibElement>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, element: LibElement) {
        if let Some(previous) = self.elements.insert(element.eid, element) {
            log::warn!(target: "elements.registry", "replaced registry entry {}", previous.eid);
        }
    }

    pub(crate) fn remove(&mut self, eid: Eid) -> Option<LibElement> {
        self.elements.remove(&eid)
    }

    pub fn get(&self, eid: Eid) -> Option<&LibElement> {
        self.elements.get(&eid)
    }

    pub(crate) fn get_mut(&mut self, eid: Eid) -> Option<&mut LibElement> {
        self.elements.get_mut(&eid)
    }

    pub fn contains(&self, eid: Eid) -> bool {
        self.elements.contains_key(&eid)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Registered ids in allocation order.
    pub fn eids(&self) -> Vec<Eid> {
        let mut eids: Vec<Eid> = self.elements.keys().copied().collect();
        eids.sort_unstable();
        eids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_records_get_a_drawing_capability() {
        let canvas = LibElement::new(Eid::new(1, 1), "canvas", NodeKey(3));
        let div = LibElement::new(Eid::new(1, 2), "div", NodeKey(4));
        assert!(canvas.is_canvas());
        assert!(!div.is_canvas());
    }

    #[test]
    fn eids_come_back_in_allocation_order() {
        let mut registry = Registry::new();
        for (tag, serial) in [(9000, 3), (10, 1), (5000, 2)] {
            let eid = Eid::new(tag, serial);
            registry.insert(LibElement::new(eid, "p", NodeKey(serial as u32)));
        }
        let serials: Vec<u64> = registry.eids().iter().map(|e| e.serial()).collect();
        assert_eq!(serials, vec![1, 2, 3]);

        assert!(registry.remove(Eid::new(10, 1)).is_some());
        assert!(!registry.contains(Eid::new(10, 1)));
        assert_eq!(registry.len(), 2);
    }
}
