//! XML source for the generic settings tree.
//!
//! Parses an XML document into a [`settings_tree::Node`], the same tree the
//! JSON and INI sources produce.
//!
//! # Mapping
//!
//! - An element with neither attributes nor child elements becomes a value
//!   holding its text.
//! - Any other element becomes an object: each attribute is an entry, and
//!   each distinct child tag (compared case-insensitively) is an entry.
//! - A tag that occurs more than once becomes an array of the occurrences.
//! - When an attribute and a child element share a name, the child wins and
//!   the attribute is ignored.
//!
//! # Example
//!
//! ```rust
//! use settings_xml::parse;
//!
//! let settings = parse(
//!     r#"<server host="localhost">
//!   <port>8080</port>
//!   <alias>a</alias>
//!   <alias>b</alias>
//! </server>"#,
//!     None,
//! )
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(settings.name(), Some("server"));
//! assert_eq!(settings.lookup("HOST").unwrap().value().unwrap(), "localhost");
//! assert_eq!(settings.lookup("port").unwrap().value().unwrap(), "8080");
//! assert_eq!(settings.lookup("alias").unwrap().children().unwrap().len(), 2);
//! ```
//!
//! Blank input is not an error, it just has no settings:
//!
//! ```rust
//! assert!(settings_xml::parse("  \n", None).unwrap().is_none());
//! ```

mod builder;
pub mod document;
pub mod error;
pub mod options;

pub use error::{Error, Location, Result, SyntaxError};
pub use options::XmlParseOptions;
pub use settings_tree::{ArrayNode, Node, NodeKind, ObjectNode, TreeError, ValueNode};

use tracing::debug;

/// Parse XML settings, optionally renaming the root node.
///
/// Returns `Ok(None)` when `text` is absent, empty, or whitespace only.
///
/// # Errors
///
/// [`Error::MalformedDocument`] if `text` is not well-formed XML.
pub fn parse<'a>(
    text: impl Into<Option<&'a str>>,
    root_name: Option<&str>,
) -> Result<Option<Node>> {
    let options = XmlParseOptions {
        root_name: root_name.map(str::to_string),
        ..XmlParseOptions::default()
    };
    parse_with_options(text, &options)
}

/// Parse XML settings with explicit options.
///
/// # Errors
///
/// [`Error::MalformedDocument`] if `text` is not well-formed XML.
pub fn parse_with_options<'a>(
    text: impl Into<Option<&'a str>>,
    options: &XmlParseOptions,
) -> Result<Option<Node>> {
    let Some(text) = text.into().filter(|text| !text.trim().is_empty()) else {
        debug!("blank XML input, no settings");
        return Ok(None);
    };

    debug!(bytes = text.len(), trim_text = options.trim_text, "parsing XML settings");
    let document = document::read_document(text, options.trim_text)?;

    let root_name = options
        .root_name
        .clone()
        .unwrap_or_else(|| document.root.name.clone());
    let root = builder::build_node(&document.root, Some(root_name));

    debug!(root = ?root.name(), kind = %root.kind(), "parsed XML settings");
    Ok(Some(root))
}
