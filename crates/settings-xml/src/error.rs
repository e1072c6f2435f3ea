//! Error types for reading XML settings.

use std::fmt;
use thiserror::Error;

/// Result type alias for settings-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`parse`](crate::parse).
///
/// Building the tree itself cannot fail, so the only error is a document
/// that is not well-formed. No partial tree is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text is not well-formed XML.
    #[error("Malformed XML document: {kind}{}", at(.location))]
    MalformedDocument {
        /// What the reader rejected.
        kind: SyntaxError,
        /// Where it was rejected, when known.
        location: Option<Location>,
    },
}

/// The reader's own diagnostic for a malformed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Syntax error reported by quick-xml, with its message.
    #[error("{message}")]
    Xml { message: String },

    /// Input ended while an element was still open.
    #[error("Unexpected end of input, expected closing tag </{name}>")]
    UnclosedElement { name: String },

    /// End tag does not match the open element.
    #[error("End tag </{found}> does not match start tag <{expected}>")]
    MismatchedEndTag { expected: String, found: String },

    /// End tag with no open element.
    #[error("Unexpected closing tag </{name}>")]
    UnexpectedEndTag { name: String },

    /// Non-whitespace text before or after the root element.
    #[error("Text content outside the root element")]
    TextOutsideRoot,

    /// No root element.
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// More than one top-level element.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,
}

impl Error {
    pub(crate) fn malformed(kind: SyntaxError, location: Option<Location>) -> Self {
        Error::MalformedDocument { kind, location }
    }

    /// The underlying diagnostic.
    pub fn kind(&self) -> &SyntaxError {
        match self {
            Error::MalformedDocument { kind, .. } => kind,
        }
    }

    /// Where the document was rejected, if known.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::MalformedDocument { location, .. } => *location,
        }
    }
}

fn at(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at {}", location),
        None => String::new(),
    }
}

/// A position in the source text (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Location {
    /// Resolve a byte offset to row and column. Offsets past the end are
    /// clamped to the end of `source`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut row = 0;
        let mut column = 0;
        let mut current_offset = 0;

        for ch in source.chars() {
            if current_offset >= offset {
                break;
            }

            if ch == '\n' {
                row += 1;
                column = 0;
            } else {
                column += 1;
            }

            current_offset += ch.len_utf8();
        }

        Self {
            offset,
            row,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.row + 1, self.column + 1)
    }
}
