//! Core node types for the settings tree.

use crate::error::{Result, TreeError};
use indexmap::IndexMap;
use std::fmt;

/// Normalize a key for case-insensitive comparison.
///
/// Object entries are stored under this form; the original casing lives on
/// the child node's name. Parsers that group keys themselves should use the
/// same normalization so their grouping agrees with [`Node::lookup`].
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// The kind of a settings node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Value,
    Object,
    Array,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Value => "value",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// A node of a settings tree.
///
/// Trees are immutable once built. Consumers written against `Node` do not
/// need to know which format parser produced the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single string payload.
    Value(ValueNode),

    /// Named entries with case-insensitive keys, in insertion order.
    Object(ObjectNode),

    /// Repeated occurrences of one key, in document order.
    Array(ArrayNode),
}

/// A leaf node holding a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueNode {
    name: Option<String>,
    value: String,
}

/// A keyed collection of nodes.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    name: Option<String>,
    /// Keyed by [`normalize_key`]; each child carries its original-cased name.
    entries: IndexMap<String, Node>,
}

/// An ordered sequence of unnamed nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayNode {
    name: Option<String>,
    children: Vec<Node>,
}

impl Node {
    /// Create a value node.
    pub fn new_value(name: Option<String>, value: impl Into<String>) -> Self {
        Node::Value(ValueNode::new(name, value))
    }

    /// Create an object node from `(key, node)` entries.
    ///
    /// See [`ObjectNode::new`] for how colliding keys are resolved.
    pub fn new_object(
        name: Option<String>,
        entries: impl IntoIterator<Item = (String, Node)>,
    ) -> Self {
        Node::Object(ObjectNode::new(name, entries))
    }

    /// Create an array node.
    pub fn new_array(name: Option<String>, children: impl IntoIterator<Item = Node>) -> Self {
        Node::Array(ArrayNode::new(name, children))
    }

    /// The key this node is stored under in its parent, or the root name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Value(node) => node.name.as_deref(),
            Node::Object(node) => node.name.as_deref(),
            Node::Array(node) => node.name.as_deref(),
        }
    }

    /// Return this node renamed to `name`. Descendants are untouched.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(Some(name.into()));
        self
    }

    fn set_name(&mut self, name: Option<String>) {
        match self {
            Node::Value(node) => node.name = name,
            Node::Object(node) => node.name = name,
            Node::Array(node) => node.name = name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Value(_) => NodeKind::Value,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Look up a child of an object node, ignoring key case.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotObjectKind`] on value and array nodes,
    /// [`TreeError::KeyNotFound`] when no entry matches.
    pub fn lookup(&self, key: &str) -> Result<&Node> {
        match self {
            Node::Object(object) => object.get(key).ok_or_else(|| TreeError::KeyNotFound {
                key: key.to_string(),
            }),
            Node::Value(_) | Node::Array(_) => Err(TreeError::NotObjectKind { kind: self.kind() }),
        }
    }

    /// Children of an object (in insertion order) or an array (in order).
    ///
    /// # Errors
    ///
    /// [`TreeError::NotCollectionKind`] on value nodes.
    pub fn children(&self) -> Result<Children<'_>> {
        match self {
            Node::Object(object) => Ok(Children::Object(object.entries.values())),
            Node::Array(array) => Ok(Children::Array(array.children.iter())),
            Node::Value(_) => Err(TreeError::NotCollectionKind { kind: self.kind() }),
        }
    }

    /// The payload of a value node.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotValueKind`] on object and array nodes.
    pub fn value(&self) -> Result<&str> {
        match self {
            Node::Value(node) => Ok(&node.value),
            Node::Object(_) | Node::Array(_) => Err(TreeError::NotValueKind { kind: self.kind() }),
        }
    }

    /// Like [`Node::lookup`], but `None` for any failure.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|object| object.get(key))
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Node::Value(node) => Some(&node.value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Node::Array(node) => Some(node),
            _ => None,
        }
    }
}

impl From<ValueNode> for Node {
    fn from(node: ValueNode) -> Self {
        Node::Value(node)
    }
}

impl From<ObjectNode> for Node {
    fn from(node: ObjectNode) -> Self {
        Node::Object(node)
    }
}

impl From<ArrayNode> for Node {
    fn from(node: ArrayNode) -> Self {
        Node::Array(node)
    }
}

impl ValueNode {
    pub fn new(name: Option<String>, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl ObjectNode {
    /// Create an object from `(key, node)` entries.
    ///
    /// Each child is renamed to its key. When two keys are equal after
    /// [`normalize_key`], the entry keeps the position of the first and the
    /// node of the last.
    pub fn new(name: Option<String>, entries: impl IntoIterator<Item = (String, Node)>) -> Self {
        let mut map = IndexMap::new();
        for (key, mut node) in entries {
            let normalized = normalize_key(&key);
            node.set_name(Some(key));
            map.insert(normalized, node);
        }
        Self { name, entries: map }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up an entry, ignoring key case.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(&normalize_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry keys with their original casing, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.values().filter_map(Node::name)
    }

    /// `(key, node)` pairs with original-cased keys, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.entries
            .iter()
            .map(|(normalized, node)| (node.name().unwrap_or(normalized.as_str()), node))
    }
}

// Entry order is part of a tree's identity, which `IndexMap`'s own
// equality ignores.
impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

impl Eq for ObjectNode {}

impl ArrayNode {
    /// Create an array. Children lose any name they had.
    pub fn new(name: Option<String>, children: impl IntoIterator<Item = Node>) -> Self {
        let children = children
            .into_iter()
            .map(|mut child| {
                child.set_name(None);
                child
            })
            .collect();
        Self { name, children }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }
}

/// Iterator over the children of an object or array node.
#[derive(Debug, Clone)]
pub enum Children<'a> {
    Object(indexmap::map::Values<'a, String, Node>),
    Array(std::slice::Iter<'a, Node>),
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Object(values) => values.next(),
            Children::Array(items) => items.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Children::Object(values) => values.size_hint(),
            Children::Array(items) => items.size_hint(),
        }
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Children::Object(values) => values.next_back(),
            Children::Array(items) => items.next_back(),
        }
    }
}

impl ExactSizeIterator for Children<'_> {}
