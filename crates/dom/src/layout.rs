//! Minimal block layout used to answer bounding-box queries.
//!
//! Every element and text node gets its own row of `ROW_HEIGHT` px, children
//! are stacked vertically under it at the parent's width. Canvases take their
//! intrinsic size. Elements with `display: none` take no space.

use core_types::Rect;

use crate::document::Document;
use crate::types::{NodeKey, NodeKind};

const ROW_HEIGHT: f32 = 24.0; // temporary until we have text metrics

pub(crate) fn bounds_of(doc: &Document, target: NodeKey) -> Option<Rect> {
    if !doc.is_connected(target) {
        return None;
    }
    let x = 0.0;
    let width = doc.viewport_width();
    let mut cursor = 0.0;
    let mut stack = vec![Step::Enter(doc.root())];

    while let Some(step) = stack.pop() {
        let key = match step {
            Step::Enter(key) => key,
            Step::Exit { key, top } => {
                if key == target {
                    return Some(Rect::new(x, top, width, cursor - top));
                }
                continue;
            }
        };
        let Ok(record) = doc.record(key) else {
            continue;
        };

        let leaf = match &record.kind {
            // Document: no own row, just a container for children.
            NodeKind::Document => None,
            NodeKind::Element(_) if doc.style(key, "display") == Some("none") => {
                Some(Rect::new(x, cursor, 0.0, 0.0))
            }
            NodeKind::Element(element) => match &element.canvas {
                Some(canvas) => Some(Rect::new(x, cursor, canvas.width as f32, canvas.height as f32)),
                None => {
                    stack.push(Step::Exit { key, top: cursor });
                    cursor += ROW_HEIGHT;
                    stack.extend(record.children.iter().rev().map(|&child| Step::Enter(child)));
                    continue;
                }
            },
            NodeKind::Text { .. } | NodeKind::Markup { .. } => {
                Some(Rect::new(x, cursor, width, ROW_HEIGHT))
            }
        };

        match leaf {
            Some(rect) => {
                if key == target {
                    return Some(rect);
                }
                cursor = rect.bottom();
            }
            None => {
                stack.push(Step::Exit { key, top: cursor });
                stack.extend(record.children.iter().rev().map(|&child| Step::Enter(child)));
            }
        }
    }
    None
}

/// Pending work for the block walk. A container's height is only known once
/// its children have been placed, so it is revisited on `Exit`.
enum Step {
    Enter(NodeKey),
    Exit { key: NodeKey, top: f32 },
}
