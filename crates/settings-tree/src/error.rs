//! Errors raised by settings tree accessors.

use crate::node::NodeKind;
use thiserror::Error;

/// Result type alias for settings tree accessors.
pub type Result<T> = std::result::Result<T, TreeError>;

/// An accessor was used on a node of the wrong kind, or a key was missing.
///
/// Each failure mode is its own variant so callers can branch on it
/// instead of matching on messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Key lookup on a node that is not an object.
    #[error("Key lookup is not supported on {kind} nodes")]
    NotObjectKind { kind: NodeKind },

    /// No entry matched the key after case normalization.
    #[error("Key not found: '{key}'")]
    KeyNotFound { key: String },

    /// Child iteration on a value node.
    #[error("Child iteration is not supported on {kind} nodes")]
    NotCollectionKind { kind: NodeKind },

    /// Value access on an object or array node.
    #[error("Value access is not supported on {kind} nodes")]
    NotValueKind { kind: NodeKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TreeError::NotObjectKind {
            kind: NodeKind::Array,
        };
        assert_eq!(err.to_string(), "Key lookup is not supported on array nodes");

        let err = TreeError::KeyNotFound {
            key: "Port".to_string(),
        };
        assert_eq!(err.to_string(), "Key not found: 'Port'");

        let err = TreeError::NotValueKind {
            kind: NodeKind::Object,
        };
        assert_eq!(err.to_string(), "Value access is not supported on object nodes");
    }
}
