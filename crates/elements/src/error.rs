use core_types::Eid;
use dom::DomError;

/// Construction was refused before any node was created.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid element tag {0:?}")]
    InvalidTag(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UiError {
    #[error("no element registered as {0}")]
    UnknownElement(Eid),
    #[error(transparent)]
    Dom(#[from] DomError),
}
