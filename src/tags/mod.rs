//! Tag scanning for markup documents.
//!
//! This module provides:
//! - `locate_tag_at` / `tag_at` to find the opening tag name under a cursor
//! - `find_matching_close` / `closing_tag_after` to pair an opening tag with its
//!   closing tag, skipping nested tags of the same name
//!
//! Both are stateless; `crate::sync` owns the per-document state built on them.

mod closing;
mod locate;

use std::ops::Range;

pub use closing::{closing_tag_after, find_matching_close};
pub use locate::{locate_tag_at, tag_at};

/// An opening tag's name and the span its name characters occupy.
///
/// The span excludes `<`, `/` and `>`, and is empty for a bare `<`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReference {
    pub name: String,
    pub range: Range<usize>,
}

impl TagReference {
    /// Shift the span by `offset`, e.g. from line-local to document coordinates.
    pub fn offset_by(self, offset: usize) -> Self {
        Self {
            name: self.name,
            range: self.range.start + offset..self.range.end + offset,
        }
    }
}

/// Characters allowed in a tag name.
pub(crate) fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}
