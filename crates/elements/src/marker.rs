//! The marker attribute that ties a document node back to its wrapper.
//!
//! Stored as JSON (`{"eid":"4821-7"}`) under the `data` attribute so the
//! mapping survives anything that only copies attributes.

use core_types::Eid;
use dom::{Document, NodeKey};
use serde::{Deserialize, Serialize};

pub const MARKER_ATTRIBUTE: &str = "data";

#[derive(Debug, Serialize, Deserialize)]
struct Marker {
    eid: String,
}

pub fn encode(eid: Eid) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Marker {
        eid: eid.to_string(),
    })
}

/// `None` for anything that is not a well-formed marker.
pub fn decode(raw: &str) -> Option<Eid> {
    let marker: Marker = match serde_json::from_str(raw) {
        Ok(marker) => marker,
        Err(err) => {
            log::debug!(target: "elements.marker", "malformed marker {raw:?}: {err}");
            return None;
        }
    };
    marker.eid.parse().ok()
}

pub fn read(doc: &Document, node: NodeKey) -> Option<Eid> {
    doc.attribute(node, MARKER_ATTRIBUTE).and_then(decode)
}
