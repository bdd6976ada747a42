use crate::NodeKey;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("unknown node {0}")]
    UnknownNode(NodeKey),
    #[error("invalid element tag name {0:?}")]
    InvalidTagName(String),
    #[error("appending {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeKey, child: NodeKey },
    #[error("node {0} cannot have children")]
    InvalidParent(NodeKey),
    #[error("node {0} is not an element")]
    NotAnElement(NodeKey),
    #[error("node {0} is not a canvas")]
    NotACanvas(NodeKey),
}
