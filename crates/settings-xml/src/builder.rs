//! Turns an XML element tree into a settings tree.
//!
//! Every element goes through [`classify`] exactly once:
//!
//! - no attributes and no child elements: a value holding the element's text
//! - otherwise: an object with one entry per attribute and one entry per
//!   group of same-named child elements (compared case-insensitively)
//!
//! A group of one element becomes that element's own node; a group of two
//! or more becomes an array of their nodes. An attribute named like a group
//! is dropped and the group's entry is used instead.
//!
//! Attribute entries come first, in declaration order, followed by group
//! entries in order of each group's first occurrence.

use crate::document::{XmlAttribute, XmlElement};
use settings_tree::{Node, normalize_key};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::trace;

/// Child elements sharing one tag, compared case-insensitively.
#[derive(Debug)]
pub(crate) struct Group<'a> {
    /// Tag of the first occurrence.
    pub name: &'a str,
    /// Occurrences in document order.
    pub elements: Vec<&'a XmlElement>,
}

/// What one element becomes.
#[derive(Debug)]
pub(crate) enum Shape<'a> {
    /// Text content of an element with no attributes and no children.
    Value(&'a str),

    /// Surviving attributes and child groups.
    Object {
        attributes: Vec<&'a XmlAttribute>,
        groups: Vec<Group<'a>>,
    },
}

/// Decide the shape of `element`, applying attribute shadowing.
pub(crate) fn classify(element: &XmlElement) -> Shape<'_> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for child in element.child_elements() {
        match group_index.entry(normalize_key(&child.name)) {
            Entry::Occupied(slot) => groups[*slot.get()].elements.push(child),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(Group {
                    name: &child.name,
                    elements: vec![child],
                });
            }
        }
    }

    let attributes: Vec<&XmlAttribute> = element
        .attributes
        .iter()
        .filter(|attribute| {
            let shadowed = group_index.contains_key(&normalize_key(&attribute.name));
            if shadowed {
                trace!(
                    element = %element.name,
                    attribute = %attribute.name,
                    "attribute shadowed by child element"
                );
            }
            !shadowed
        })
        .collect();

    if attributes.is_empty() && groups.is_empty() {
        return Shape::Value(element.text());
    }

    trace!(
        element = %element.name,
        attributes = attributes.len(),
        groups = groups.len(),
        "element becomes an object"
    );
    Shape::Object { attributes, groups }
}

/// Build the node for `element`, named `name`.
pub(crate) fn build_node(element: &XmlElement, name: Option<String>) -> Node {
    match classify(element) {
        Shape::Value(text) => Node::new_value(name, text),
        Shape::Object { attributes, groups } => {
            let attribute_entries = attributes.into_iter().map(|attribute| {
                (
                    attribute.name.clone(),
                    Node::new_value(None, attribute.value.as_str()),
                )
            });
            let group_entries = groups
                .into_iter()
                .map(|group| (group.name.to_string(), build_group(group)));

            Node::new_object(name, attribute_entries.chain(group_entries))
        }
    }
}

fn build_group(group: Group<'_>) -> Node {
    let name = Some(group.name.to_string());
    match group.elements.as_slice() {
        [single] => build_node(single, name),
        elements => Node::new_array(
            name,
            elements.iter().map(|element| build_node(element, None)),
        ),
    }
}
