//! XML document reader producing a small element tree.
//!
//! Wraps [`quick-xml`]'s pull reader. Only what the settings builder needs is
//! kept: element names, attributes, child elements and text. Comments,
//! processing instructions, the XML declaration and DOCTYPE are skipped.
//! Names are kept exactly as written, prefixes included; namespaces are not
//! resolved.

use crate::error::{Error, Location, Result, SyntaxError};
use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesStart, Event};

/// A parsed XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// The root element of the document.
    pub root: XmlElement,
}

/// An XML element.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// The qualified name of the element as written (e.g. `csl:text`).
    pub name: String,

    /// Attributes in declaration order.
    pub attributes: Vec<XmlAttribute>,

    /// Child content of this element.
    pub children: XmlChildren,

    /// Byte offset of the element's `<` in the source.
    pub offset: usize,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// The qualified name of the attribute as written.
    pub name: String,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

/// Children of an XML element.
#[derive(Debug, Clone)]
pub enum XmlChildren {
    /// Element has no content.
    Empty,

    /// Element contains only text. Adjacent text and CDATA sections are
    /// joined.
    Text(String),

    /// Element contains only child elements (whitespace between them is
    /// dropped).
    Elements(Vec<XmlElement>),

    /// Element contains text and elements interleaved.
    Mixed(Vec<XmlChild>),
}

/// A single child in mixed content.
#[derive(Debug, Clone)]
pub enum XmlChild {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    /// Child elements in document order, ignoring text in mixed content.
    pub fn child_elements(&self) -> Vec<&XmlElement> {
        match &self.children {
            XmlChildren::Elements(elements) => elements.iter().collect(),
            XmlChildren::Mixed(children) => children
                .iter()
                .filter_map(|c| match c {
                    XmlChild::Element(e) => Some(e),
                    XmlChild::Text(_) => None,
                })
                .collect(),
            XmlChildren::Empty | XmlChildren::Text(_) => vec![],
        }
    }

    /// Text content of an element without child elements, `""` otherwise.
    pub fn text(&self) -> &str {
        match &self.children {
            XmlChildren::Text(content) => content,
            _ => "",
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Read `source` into an element tree.
///
/// With `trim_text`, text content is trimmed by the reader.
///
/// # Errors
///
/// [`Error::MalformedDocument`] if the XML is not well-formed.
pub fn read_document(source: &str, trim_text: bool) -> Result<XmlDocument> {
    XmlReader::new(source, trim_text).read()
}

/// Internal reader state.
struct XmlReader<'a> {
    /// The source content being parsed.
    source: &'a str,

    /// The quick-xml reader.
    reader: Reader<&'a [u8]>,

    /// Elements opened but not yet closed.
    stack: Vec<OpenElement>,
}

/// An element being constructed during reading.
struct OpenElement {
    name: String,
    attributes: Vec<XmlAttribute>,
    offset: usize,
    children: Vec<XmlChild>,
}

impl OpenElement {
    fn finish(self) -> XmlElement {
        XmlElement {
            name: self.name,
            attributes: self.attributes,
            children: finalize_children(self.children),
            offset: self.offset,
        }
    }
}

impl<'a> XmlReader<'a> {
    fn new(source: &'a str, trim_text: bool) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = trim_text;
        reader.config_mut().trim_text_end = trim_text;

        Self {
            source,
            reader,
            stack: Vec::new(),
        }
    }

    fn read(mut self) -> Result<XmlDocument> {
        let mut root: Option<XmlElement> = None;

        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = self.open_element(&e, event_start)?;
                    self.stack.push(element);
                }
                Ok(Event::End(e)) => {
                    let element = self.close_element(&e, event_start)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.open_element(&e, event_start)?.finish();
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|err| {
                        self.error(
                            SyntaxError::Xml {
                                message: format!("Invalid text content: {}", err),
                            },
                            Some(event_start),
                        )
                    })?;
                    self.push_text(text.into_owned(), event_start)?;
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    self.push_text(text, event_start)?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(err) => {
                    let position = self.reader.error_position() as usize;
                    return Err(self.error(
                        SyntaxError::Xml {
                            message: err.to_string(),
                        },
                        Some(position),
                    ));
                }
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(self.error(
                SyntaxError::UnclosedElement {
                    name: open.name.clone(),
                },
                Some(open.offset),
            ));
        }

        let root = root.ok_or_else(|| self.error(SyntaxError::EmptyDocument, None))?;
        Ok(XmlDocument { root })
    }

    fn open_element(&self, e: &BytesStart<'_>, event_start: usize) -> Result<OpenElement> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let attributes = self.read_attributes(e, event_start)?;

        Ok(OpenElement {
            name,
            attributes,
            offset: event_start,
            children: Vec::new(),
        })
    }

    fn close_element(&mut self, e: &BytesEnd<'_>, event_start: usize) -> Result<XmlElement> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let Some(open) = self.stack.pop() else {
            return Err(self.error(
                SyntaxError::UnexpectedEndTag { name: end_name },
                Some(event_start),
            ));
        };

        if open.name != end_name {
            return Err(self.error(
                SyntaxError::MismatchedEndTag {
                    expected: open.name,
                    found: end_name,
                },
                Some(event_start),
            ));
        }

        Ok(open.finish())
    }

    /// Add a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(XmlChild::Element(element));
            return Ok(());
        }

        if root.is_some() {
            return Err(self.error(SyntaxError::MultipleRoots, Some(element.offset)));
        }
        *root = Some(element);
        Ok(())
    }

    fn push_text(&mut self, text: String, event_start: usize) -> Result<()> {
        match self.stack.last_mut() {
            Some(node) => {
                node.children.push(XmlChild::Text(text));
                Ok(())
            }
            // A leading byte order mark is not content.
            None if text.trim_start_matches('\u{feff}').trim().is_empty() => Ok(()),
            None => Err(self.error(SyntaxError::TextOutsideRoot, Some(event_start))),
        }
    }

    fn read_attributes(&self, e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<XmlAttribute>> {
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| {
                self.error(
                    SyntaxError::Xml {
                        message: format!("Attribute error: {}", err),
                    },
                    Some(tag_start),
                )
            })?;

            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| {
                self.error(
                    SyntaxError::Xml {
                        message: format!("Invalid attribute value: {}", err),
                    },
                    Some(tag_start),
                )
            })?;

            attributes.push(XmlAttribute {
                name,
                value: value.into_owned(),
            });
        }

        Ok(attributes)
    }

    fn error(&self, kind: SyntaxError, offset: Option<usize>) -> Error {
        Error::malformed(
            kind,
            offset.map(|offset| Location::from_offset(self.source, offset)),
        )
    }
}

fn finalize_children(children: Vec<XmlChild>) -> XmlChildren {
    if children.is_empty() {
        return XmlChildren::Empty;
    }

    let has_elements = children
        .iter()
        .any(|c| matches!(c, XmlChild::Element(_)));

    if !has_elements {
        let content = children
            .into_iter()
            .filter_map(|c| match c {
                XmlChild::Text(text) => Some(text),
                XmlChild::Element(_) => None,
            })
            .collect();
        return XmlChildren::Text(content);
    }

    let children: Vec<XmlChild> = children
        .into_iter()
        .filter(|c| !matches!(c, XmlChild::Text(text) if text.trim().is_empty()))
        .collect();

    if children.iter().all(|c| matches!(c, XmlChild::Element(_))) {
        let elements = children
            .into_iter()
            .filter_map(|c| match c {
                XmlChild::Element(e) => Some(e),
                XmlChild::Text(_) => None,
            })
            .collect();
        XmlChildren::Elements(elements)
    } else {
        XmlChildren::Mixed(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(source: &str) -> Result<XmlDocument> {
        read_document(source, false)
    }

    fn syntax_error(source: &str) -> SyntaxError {
        match read(source) {
            Err(err) => err.kind().clone(),
            Ok(doc) => panic!("expected an error, got {:?}", doc),
        }
    }

    #[test]
    fn test_read_simple_element() {
        let doc = read("<root/>").unwrap();
        assert_eq!(doc.root.name, "root");
        assert!(matches!(doc.root.children, XmlChildren::Empty));
        assert_eq!(doc.root.text(), "");
    }

    #[test]
    fn test_read_nested_elements_drops_whitespace() {
        let doc = read("<root>\n  <a/>\n  <b>x</b>\n</root>").unwrap();
        let XmlChildren::Elements(elements) = &doc.root.children else {
            panic!("expected elements, got {:?}", doc.root.children);
        };
        let names: Vec<_> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(elements[1].text(), "x");
    }

    #[test]
    fn test_text_is_kept_raw_and_joined() {
        let doc = read("<root>  a &amp; <![CDATA[<b>]]> </root>").unwrap();
        assert_eq!(doc.root.text(), "  a & <b> ");
    }

    #[test]
    fn test_trim_text_option() {
        let doc = read_document("<root>\n  value\n</root>", true).unwrap();
        assert_eq!(doc.root.text(), "value");
    }

    #[test]
    fn test_mixed_content_keeps_elements() {
        let doc = read("<root>text<a/>more</root>").unwrap();
        assert!(matches!(doc.root.children, XmlChildren::Mixed(_)));
        let names: Vec<_> = doc
            .root
            .child_elements()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["a"]);
        assert_eq!(doc.root.text(), "");
    }

    #[test]
    fn test_attributes_in_declaration_order() {
        let doc = read(r#"<root b="2" a='1' xml:lang="en" esc="&lt;x&gt;"/>"#).unwrap();
        let names: Vec<_> = doc.root.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "xml:lang", "esc"]);
        assert_eq!(doc.root.get_attribute("xml:lang"), Some("en"));
        assert_eq!(doc.root.get_attribute("esc"), Some("<x>"));
        assert_eq!(doc.root.get_attribute("missing"), None);
    }

    #[test]
    fn test_skips_declaration_comments_and_instructions() {
        let doc = read(
            "<?xml version=\"1.0\"?>\n<!-- head -->\n<root><!-- c --><?pi x?><a/></root>\n",
        )
        .unwrap();
        assert_eq!(doc.root.name, "root");
        assert_eq!(doc.root.child_elements().len(), 1);
    }

    #[test]
    fn test_qualified_names_are_kept() {
        let doc = read(r#"<csl:style xmlns:csl="http://example.org"/>"#).unwrap();
        assert_eq!(doc.root.name, "csl:style");
        assert_eq!(doc.root.attributes[0].name, "xmlns:csl");
    }

    #[test]
    fn test_root_offset() {
        let doc = read("<root>\n<child/></root>").unwrap();
        assert_eq!(doc.root.offset, 0);
    }

    #[test]
    fn test_empty_document_error() {
        assert_eq!(syntax_error(""), SyntaxError::EmptyDocument);
        assert_eq!(syntax_error("<!-- only a comment -->"), SyntaxError::EmptyDocument);
    }

    #[test]
    fn test_text_outside_root_error() {
        assert_eq!(syntax_error("wrong file format"), SyntaxError::TextOutsideRoot);
        assert_eq!(syntax_error("<root/>trailing"), SyntaxError::TextOutsideRoot);
    }

    #[test]
    fn test_multiple_roots_error() {
        let err = read("<root/><another/>").unwrap_err();
        assert_eq!(err.kind(), &SyntaxError::MultipleRoots);
        assert_eq!(err.location().map(|l| l.offset), Some(7));
    }

    #[test]
    fn test_unclosed_element_error() {
        let err = read("<root><child>").unwrap_err();
        // Depending on the quick-xml version the reader itself may notice first.
        assert!(
            matches!(
                err.kind(),
                SyntaxError::UnclosedElement { .. } | SyntaxError::Xml { .. }
            ),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_mismatched_tags_error() {
        let err = read("<root></wrong>").unwrap_err();
        // quick-xml checks end names itself and reports it as a syntax error.
        assert!(
            matches!(
                err.kind(),
                SyntaxError::MismatchedEndTag { .. } | SyntaxError::Xml { .. }
            ),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_attribute_errors() {
        assert!(matches!(
            syntax_error("<root attr=unquoted/>"),
            SyntaxError::Xml { .. }
        ));
        assert!(matches!(
            syntax_error(r#"<root a="1" a="2"/>"#),
            SyntaxError::Xml { .. }
        ));
    }
}
