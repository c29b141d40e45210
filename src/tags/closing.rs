//! Pairing an opening tag with its closing tag.
//!
//! The scan is a depth-counted race between two needles: the next opener of
//! the tag name and the next `</name>`. It is not a markup parser; comments,
//! CDATA and quoted attribute values are not recognised.

use std::ops::Range;

use super::is_name_byte;
use crate::sync::Editor;

/// Find the closing tag that balances an already-open tag named `tag_name`.
///
/// `text` is the document suffix starting just after the opening tag's name.
/// Returns the span of the closer's name characters (between `</` and `>`),
/// relative to `text`, or `None` if depth never returns to zero.
///
/// With an empty `tag_name` every `<` not followed by `/` opens and every
/// `</>` closes.
pub fn find_matching_close(text: &str, tag_name: &str) -> Option<Range<usize>> {
    let closer = format!("</{tag_name}>");
    let mut depth = 1usize;
    let mut pos = 0;

    loop {
        // Without another closer depth can only grow
        let close = pos + text[pos..].find(&closer)?;

        match next_opener(text, pos, tag_name) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + 1 + tag_name.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    let name_start = close + 2;
                    return Some(name_start..name_start + tag_name.len());
                }
                pos = close + closer.len();
            }
        }
    }
}

/// Offset of the next `<tag_name` at or after `from` that opens a nested tag.
///
/// Named openers must end at a name boundary (`<a` does not match `<abbr`).
/// Self-closing tags never need a closer and are skipped.
fn next_opener(text: &str, from: usize, tag_name: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle = format!("<{tag_name}");
    let mut pos = from;

    while let Some(found) = text[pos..].find(&needle) {
        let start = pos + found;
        let after = start + needle.len();
        pos = start + 1;

        let opens = match bytes.get(after) {
            Some(&b'/') => !tag_name.is_empty() && !is_self_closing(bytes, after),
            Some(&b) if is_name_byte(b) => {
                tag_name.is_empty() && !is_self_closing(bytes, after)
            }
            _ => !is_self_closing(bytes, after),
        };
        if opens {
            return Some(start);
        }
    }

    None
}

/// Whether the tag body starting at `from` ends in `/>`.
///
/// The body ends at the first `>`; running into another `<` first means the
/// tag is unterminated, which is not self-closing.
fn is_self_closing(bytes: &[u8], from: usize) -> bool {
    let Some(end) = bytes[from..].iter().position(|&b| b == b'<' || b == b'>') else {
        return false;
    };
    let end = from + end;
    bytes[end] == b'>' && end > from && bytes[end - 1] == b'/'
}

/// Find the closing tag for an opening tag named `tag_name` whose name ends at
/// document offset `start`. The returned span is in document coordinates.
pub fn closing_tag_after<E: Editor + ?Sized>(
    editor: &E,
    start: usize,
    tag_name: &str,
) -> Option<Range<usize>> {
    let len = editor.len();
    let start = start.min(len);
    let suffix = editor.text_in_range(start..len)?;
    find_matching_close(suffix, tag_name).map(|r| r.start + start..r.end + start)
}
