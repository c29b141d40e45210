//! The host editor surface the tag engine reads and mutates documents through.

use std::ops::Range;

use thiserror::Error;

/// Why a replacement edit was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit range {start}..{end} splits a character")]
    NotCharBoundary { start: usize, end: usize },

    #[error("document is read-only")]
    ReadOnly,

    /// The host declined the edit after it was submitted.
    #[error("edit rejected by host: {0}")]
    Rejected(String),
}

/// A single open document, as seen by the tag engine.
///
/// Offsets are byte offsets into the document's UTF-8 text.
pub trait Editor {
    /// Length of the document in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range of the line containing `offset`, excluding its line terminator.
    fn line_range(&self, offset: usize) -> Range<usize>;

    /// Text covered by `range`, or `None` if it is out of bounds or splits a character.
    fn text_in_range(&self, range: Range<usize>) -> Option<&str>;

    /// Replace the text covered by `range` with `new_text`.
    fn apply_edit(&mut self, range: Range<usize>, new_text: &str) -> Result<(), EditError>;
}
