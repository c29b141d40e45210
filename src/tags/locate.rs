//! Locating the opening tag name under the cursor.

use super::{is_name_byte, TagReference};
use crate::sync::Editor;

/// Find the opening tag whose name span contains `cursor`.
///
/// `line` is the text of a single line and `cursor` a byte offset within it;
/// the returned span is line-local. The cursor may sit anywhere from the first
/// name character up to just past the last one, so a bare `<` with the cursor
/// right after it yields an empty-named tag.
///
/// Returns `None` when there is no `<` before the cursor, when the nearest `<`
/// opens a closing tag, or when the cursor is past the name (in attributes or
/// after `>`).
pub fn locate_tag_at(line: &str, cursor: usize) -> Option<TagReference> {
    let bytes = line.as_bytes();
    let cursor = cursor.min(bytes.len());

    // Nearest `<` at or before the cursor
    let search_end = (cursor + 1).min(bytes.len());
    let tag_start = bytes[..search_end].iter().rposition(|&b| b == b'<')?;

    if bytes.get(tag_start + 1) == Some(&b'/') {
        return None;
    }

    let name_start = tag_start + 1;
    let name_len = bytes[name_start..]
        .iter()
        .take_while(|&&b| is_name_byte(b))
        .count();
    let name_end = name_start + name_len;

    if cursor < name_start || cursor > name_end {
        return None;
    }

    Some(TagReference {
        name: line[name_start..name_end].to_string(),
        range: name_start..name_end,
    })
}

/// Find the opening tag whose name span contains the document offset `offset`.
///
/// Looks only at the line containing `offset`; the returned span is in
/// document coordinates. An offset past the end of the document has no tag.
pub fn tag_at<E: Editor + ?Sized>(editor: &E, offset: usize) -> Option<TagReference> {
    if offset > editor.len() {
        return None;
    }
    let line = editor.line_range(offset);
    let text = editor.text_in_range(line.clone())?;
    let cursor = offset.saturating_sub(line.start);
    locate_tag_at(text, cursor).map(|tag| tag.offset_by(line.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryBuffer;

    fn name_at(line: &str, cursor: usize) -> Option<(String, std::ops::Range<usize>)> {
        locate_tag_at(line, cursor).map(|t| (t.name, t.range))
    }

    #[test]
    fn cursor_anywhere_in_name() {
        for cursor in 1..=4 {
            assert_eq!(
                name_at("<div class=\"x\">", cursor),
                Some(("div".to_string(), 1..4)),
                "cursor {cursor}"
            );
        }
    }

    #[test]
    fn cursor_before_lt_is_outside() {
        assert_eq!(name_at("x<div>", 1), None);
        assert_eq!(name_at("x<div>", 0), None);
    }

    #[test]
    fn cursor_in_attributes() {
        assert_eq!(name_at("<div class=\"x\">", 6), None);
        assert_eq!(name_at("<div class=\"x\">", 5), None);
    }

    #[test]
    fn cursor_after_gt() {
        assert_eq!(name_at("<b>text", 4), None);
        assert_eq!(name_at("<b>text", 7), None);
    }

    #[test]
    fn cursor_in_closing_tag() {
        assert_eq!(name_at("<b>x</b>", 6), None);
        assert_eq!(name_at("<b>x</b>", 7), None);
    }

    #[test]
    fn empty_name_after_bare_lt() {
        assert_eq!(name_at("<", 1), Some((String::new(), 1..1)));
        assert_eq!(name_at("<></>", 1), Some((String::new(), 1..1)));
        assert_eq!(name_at("< div", 2), None);
    }

    #[test]
    fn name_without_closing_gt() {
        assert_eq!(
            name_at("  <section id=", 6),
            Some(("section".to_string(), 3..10))
        );
        assert_eq!(name_at("<h1", 3), Some(("h1".to_string(), 1..3)));
    }

    #[test]
    fn nearest_lt_wins() {
        assert_eq!(name_at("<a><em>", 5), Some(("em".to_string(), 4..6)));
        assert_eq!(name_at("<a><em>", 2), Some(("a".to_string(), 1..2)));
    }

    #[test]
    fn adjacent_lt_gt() {
        // Between the two `<`: the nearest one starts a tag the cursor is not in yet
        assert_eq!(name_at("<<>>", 1), None);
        assert_eq!(name_at("<<>>", 2), Some((String::new(), 2..2)));
        assert_eq!(name_at("<<>>", 3), None);
    }

    #[test]
    fn no_tag_on_line() {
        assert_eq!(name_at("", 0), None);
        assert_eq!(name_at("plain text", 4), None);
    }

    #[test]
    fn cursor_past_line_end_is_clamped() {
        assert_eq!(name_at("<td", 40), Some(("td".to_string(), 1..3)));
    }

    #[test]
    fn tag_at_translates_to_document_offsets() {
        let buffer = MemoryBuffer::new("<ul>\n  <li>item</li>\n</ul>");
        let tag = tag_at(&buffer, 9).expect("tag under cursor");
        assert_eq!(tag.name, "li");
        assert_eq!(tag.range, 8..10);
        assert_eq!(tag_at(&buffer, 12), None);
    }

    #[test]
    fn tag_at_past_document_end() {
        let buffer = MemoryBuffer::new("<i");
        assert_eq!(tag_at(&buffer, 2).map(|t| t.range), Some(1..2));
        assert_eq!(tag_at(&buffer, 3), None);
        assert_eq!(tag_at(&buffer, 6), None);
    }

    #[test]
    fn tag_at_does_not_cross_lines() {
        let buffer = MemoryBuffer::new("<p\n>");
        assert_eq!(tag_at(&buffer, 4), None);
    }
}
