//! In-process document buffer.

use std::ops::Range;

use super::text::LineIndex;
use crate::sync::{EditError, Editor};

/// A document held in memory that applies edits immediately.
///
/// Used when the tag engine is embedded directly in a host that owns its text,
/// and to drive editing sessions in tests.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    index: LineIndex,
    read_only: bool,
    edits: usize,
}

impl MemoryBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            index: LineIndex::new(text.into()),
            read_only: false,
            edits: 0,
        }
    }

    pub fn text(&self) -> &str {
        self.index.source()
    }

    /// Reject all further edits with `EditError::ReadOnly`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of edits applied so far.
    pub fn edit_count(&self) -> usize {
        self.edits
    }
}

impl Editor for MemoryBuffer {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn line_range(&self, offset: usize) -> Range<usize> {
        self.index.line_range(offset)
    }

    fn text_in_range(&self, range: Range<usize>) -> Option<&str> {
        self.index.slice(range)
    }

    fn apply_edit(&mut self, range: Range<usize>, new_text: &str) -> Result<(), EditError> {
        if self.read_only {
            return Err(EditError::ReadOnly);
        }
        self.index.check_range(&range)?;

        let mut text = self.index.source().to_string();
        text.replace_range(range, new_text);
        self.index = LineIndex::new(text);
        self.edits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_edit_replaces_range() {
        let mut buffer = MemoryBuffer::new("<a>\n</a>");
        buffer.apply_edit(6..7, "em").unwrap();
        assert_eq!(buffer.text(), "<a>\n</em>");
        assert_eq!(buffer.line_range(5), 4..9);
        assert_eq!(buffer.edit_count(), 1);
    }

    #[test]
    fn invalid_edits_leave_text_alone() {
        let mut buffer = MemoryBuffer::new("<a></a>");
        assert!(matches!(
            buffer.apply_edit(5..20, "b"),
            Err(EditError::OutOfBounds { .. })
        ));
        buffer.set_read_only(true);
        assert_eq!(buffer.apply_edit(5..6, "b"), Err(EditError::ReadOnly));
        assert_eq!(buffer.text(), "<a></a>");
        assert_eq!(buffer.edit_count(), 0);
    }
}
