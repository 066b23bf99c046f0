//! Error types for format and tree operations

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            FormatError::ParseError(err.to_string())
        } else {
            FormatError::SerializationError(err.to_string())
        }
    }
}

/// Violations of the component tree invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A referenced node id does not exist
    UnknownNode(String),
    /// A leaf component was given a child
    LeafCannotHaveChildren { parent: String, kind: String },
    /// The id is already used by another node
    DuplicateId(String),
    /// A node's parent reference disagrees with the children lists
    InconsistentParent(String),
    /// A node cannot be reached from the root
    Unreachable(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnknownNode(id) => write!(f, "Unknown node '{id}'"),
            TreeError::LeafCannotHaveChildren { parent, kind } => {
                write!(f, "Node '{parent}' is a {kind} and cannot have children")
            }
            TreeError::DuplicateId(id) => write!(f, "Duplicate node id '{id}'"),
            TreeError::InconsistentParent(id) => {
                write!(f, "Node '{id}' is not listed exactly once by its parent")
            }
            TreeError::Unreachable(id) => write!(f, "Node '{id}' is not reachable from the root"),
        }
    }
}

impl std::error::Error for TreeError {}
