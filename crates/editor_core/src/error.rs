use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised by the editing core.
///
/// Interactive edits never surface these to the user; they degrade to an
/// outcome value instead. Errors are reserved for setup problems such as a
/// broken configuration document.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Invalid editor configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),
}

pub type EditorResult<T> = Result<T, EditorError>;
