//! Options controlling how an XML document becomes a settings tree.

/// Options for [`parse_with_options`](crate::parse_with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlParseOptions {
    /// Name given to the root node instead of the root element's tag.
    ///
    /// Only the root is renamed; descendants keep their tags.
    pub root_name: Option<String>,

    /// Trim leading and trailing whitespace from text content (default: false).
    ///
    /// When false, element text is kept exactly as written.
    pub trim_text: bool,
}

impl XmlParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root name override.
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = Some(root_name.into());
        self
    }

    /// Set whether text content is trimmed.
    pub fn with_trim_text(mut self, trim_text: bool) -> Self {
        self.trim_text = trim_text;
        self
    }
}
