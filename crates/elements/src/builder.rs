//! One-shot element construction from a positional argument list.
//!
//! ```ignore
//! let body = doc.body();
//! let h1 = build(&mut doc, "h1", [
//!     BuildArg::content("Hello world!"),
//!     BuildArg::items([Item::str("class"), Item::str("main-title")]),
//!     BuildArg::Attach(body),
//! ])?;
//! ```
//!
//! Arguments apply in order, so later ones win. A failing argument is logged
//! and skipped; only an invalid tag aborts the whole construction.

use std::fmt;

use dom::{Document, Listener, NodeKey};

use crate::classify::{is_attribute_name, is_event_name, is_value_field};
use crate::error::BuildError;

/// Text or number content.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Text(String),
    Number(f64),
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<f64> for Content {
    fn from(n: f64) -> Self {
        Content::Number(n)
    }
}

impl From<i32> for Content {
    fn from(n: i32) -> Self {
        Content::Number(n.into())
    }
}

/// One slot of an [`BuildArg::Items`] list.
#[derive(Clone)]
pub enum Item {
    Node(NodeKey),
    Str(String),
    Handler(Listener),
}

impl Item {
    pub fn str(s: impl Into<String>) -> Self {
        Item::Str(s.into())
    }

    pub fn handler(f: impl Fn(&dom::Event) + 'static) -> Self {
        Item::Handler(dom::listener(f))
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Node(key) => write!(f, "Node({key})"),
            Item::Str(s) => write!(f, "Str({s:?})"),
            Item::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

#[derive(Clone)]
pub enum PropValue {
    Str(String),
    Handler(Listener),
}

impl PropValue {
    pub fn handler(f: impl Fn(&dom::Event) + 'static) -> Self {
        PropValue::Handler(dom::listener(f))
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(s) => write!(f, "Str({s:?})"),
            PropValue::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum BuildArg {
    /// Value for form fields, inner markup for everything else.
    Content(Content),
    /// Attach the new element as the last child of this node.
    Attach(NodeKey),
    /// Children, `[attribute, value]` pairs and `[event, handler]` pairs.
    Items(Vec<Item>),
    /// Keyed attributes and handlers.
    Props(Vec<(String, PropValue)>),
}

impl BuildArg {
    pub fn content(content: impl Into<Content>) -> Self {
        BuildArg::Content(content.into())
    }

    pub fn items(items: impl IntoIterator<Item = Item>) -> Self {
        BuildArg::Items(items.into_iter().collect())
    }

    pub fn props<K, V>(props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<PropValue>,
    {
        BuildArg::Props(
            props
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Create a `tag` element in `doc` and apply `args` to it.
pub fn build(
    doc: &mut Document,
    tag: &str,
    args: impl IntoIterator<Item = BuildArg>,
) -> Result<NodeKey, BuildError> {
    let node = doc.create_element(tag).map_err(|err| {
        log::error!(target: "elements.build", "cannot build element: {err}");
        BuildError::InvalidTag(tag.to_string())
    })?;
    let value_field = doc.tag_name(node).is_some_and(is_value_field);

    for arg in args {
        let result = match arg {
            BuildArg::Content(content) => {
                let text = content.to_string();
                if value_field {
                    doc.set_value(node, &text)
                } else {
                    doc.set_inner_html(node, &text)
                }
            }
            BuildArg::Attach(parent) => doc.append_child(parent, node),
            BuildArg::Items(items) => {
                apply_items(doc, node, &items);
                Ok(())
            }
            BuildArg::Props(props) => {
                apply_props(doc, node, props);
                Ok(())
            }
        };
        if let Err(err) = result {
            log::warn!(target: "elements.build", "<{tag}> {node}: skipped argument: {err}");
        }
    }
    Ok(node)
}

fn apply_items(doc: &mut Document, node: NodeKey, items: &[Item]) {
    let mut i = 0;
    while i < items.len() {
        let result = match (&items[i], items.get(i + 1)) {
            (Item::Node(child), _) => doc.append_child(node, *child),
            (Item::Str(name), Some(Item::Handler(handler))) if is_event_name(name) => {
                i += 1;
                doc.add_event_listener(node, name, Listener::clone(handler))
            }
            (Item::Str(name), Some(Item::Str(value))) if is_attribute_name(name) => {
                i += 1;
                doc.set_attribute(node, name, value)
            }
            (other, _) => {
                log::trace!(target: "elements.build", "ignored item {other:?}");
                Ok(())
            }
        };
        if let Err(err) = result {
            log::warn!(target: "elements.build", "{node}: skipped item: {err}");
        }
        i += 1;
    }
}

fn apply_props(doc: &mut Document, node: NodeKey, props: Vec<(String, PropValue)>) {
    for (key, value) in props {
        let result = match value {
            PropValue::Str(value) if is_attribute_name(&key) => {
                doc.set_attribute(node, &key, &value)
            }
            PropValue::Handler(handler) if is_event_name(&key) => {
                doc.add_event_listener(node, &key, handler)
            }
            _ => {
                log::trace!(target: "elements.build", "ignored prop {key:?}");
                Ok(())
            }
        };
        if let Err(err) = result {
            log::warn!(target: "elements.build", "{node}: skipped prop {key:?}: {err}");
        }
    }
}
