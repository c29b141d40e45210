//! Cursor movement notification.
//!
//! LSP has no standard notification for selection changes, so clients send
//! `tagSync/didChangeSelection` whenever the primary selection moves.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Range, TextDocumentIdentifier};

/// Method name of the selection notification.
pub const SELECTION_CHANGED: &str = "tagSync/didChangeSelection";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChangedParams {
    pub text_document: TextDocumentIdentifier,
    /// The primary selection; its start is taken as the cursor.
    pub selection: Range,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Position;

    #[test]
    fn deserializes_camel_case() {
        let params: SelectionChangedParams = serde_json::from_str(
            r#"{"textDocument":{"uri":"file:///a.html"},"selection":{"start":{"line":1,"character":2},"end":{"line":1,"character":4}}}"#,
        )
        .unwrap();
        assert_eq!(params.text_document.uri.as_str(), "file:///a.html");
        assert_eq!(params.selection.start, Position::new(1, 2));
    }
}
