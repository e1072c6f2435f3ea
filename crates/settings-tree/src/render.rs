//! Text and serde renderings of a settings tree.

use crate::node::Node;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Indented outline, two spaces per level, no trailing newline:
///
/// ```text
/// object: {
///   item: [
///     "value1"
///     "value2"
///   ]
/// }
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    f.write_str(&indent)?;
    if let Some(name) = node.name() {
        write!(f, "{}: ", name)?;
    }

    match node {
        Node::Value(value) => write!(f, "{:?}", value.value()),
        Node::Object(object) => {
            if object.is_empty() {
                return f.write_str("{}");
            }
            f.write_str("{")?;
            for (_, child) in object.iter() {
                f.write_str("\n")?;
                write_node(f, child, depth + 1)?;
            }
            write!(f, "\n{}}}", indent)
        }
        Node::Array(array) => {
            if array.is_empty() {
                return f.write_str("[]");
            }
            f.write_str("[")?;
            for child in array.iter() {
                f.write_str("\n")?;
                write_node(f, child, depth + 1)?;
            }
            write!(f, "\n{}]", indent)
        }
    }
}

/// Values serialize as strings, objects as maps keyed by their original-cased
/// keys in insertion order, arrays as sequences. Node names other than
/// object keys are not part of the output.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Value(value) => serializer.serialize_str(value.value()),
            Node::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, child) in object.iter() {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
            Node::Array(array) => serializer.collect_seq(array.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new_object(
            Some("object".to_string()),
            vec![
                (
                    "item".to_string(),
                    Node::new_array(
                        None,
                        vec![Node::new_value(None, "value1"), Node::new_value(None, "value2")],
                    ),
                ),
                ("attr".to_string(), Node::new_value(None, "te\"st")),
                ("empty".to_string(), Node::new_object(None, Vec::<(String, Node)>::new())),
            ],
        )
    }

    #[test]
    fn test_display_outline() {
        insta::assert_snapshot!(sample().to_string(), @r#"
        object: {
          item: [
            "value1"
            "value2"
          ]
          attr: "te\"st"
          empty: {}
        }
        "#);
    }

    #[test]
    fn test_display_single_value() {
        let node = Node::new_value(Some("StringValue".to_string()), "");
        assert_eq!(node.to_string(), r#"StringValue: """#);
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"item":["value1","value2"],"attr":"te\"st","empty":{}}"#
        );
    }
}
