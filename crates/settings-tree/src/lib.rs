//! Generic settings tree shared by configuration format parsers.
//!
//! A settings tree is an immutable hierarchy of three node kinds:
//! - [`ValueNode`]: a single string
//! - [`ObjectNode`]: named entries with case-insensitive keys
//! - [`ArrayNode`]: repeated occurrences of one key
//!
//! Format parsers (XML, JSON, INI, ...) all produce a [`Node`], so code that
//! consumes configuration does not care which format it came from.
//!
//! # Example
//!
//! ```rust
//! use settings_tree::{Node, TreeError};
//!
//! let root = Node::new_object(
//!     Some("server".to_string()),
//!     vec![("Port".to_string(), Node::new_value(None, "8080"))],
//! );
//!
//! assert_eq!(root.lookup("port").unwrap().value().unwrap(), "8080");
//! assert!(matches!(root.lookup("host"), Err(TreeError::KeyNotFound { .. })));
//! ```

pub mod error;
pub mod node;
mod render;

pub use error::{Result, TreeError};
pub use node::{ArrayNode, Children, Node, NodeKind, ObjectNode, ValueNode, normalize_key};
