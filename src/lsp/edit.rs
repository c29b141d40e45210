//! Collecting closing tag rewrites as an LSP workspace edit.
//!
//! The server does not own the client's buffer: a rewrite is validated against
//! the server's copy of the text, queued, and sent with `workspace/applyEdit`
//! once the notification handler is done with the document. The edit carries
//! the document version it was computed against, so a client that has moved on
//! refuses it instead of applying a stale range.

use std::ops::Range;

use tower_lsp::lsp_types::{
    DocumentChanges, OneOf, OptionalVersionedTextDocumentIdentifier, TextDocumentEdit, TextEdit,
    Url, WorkspaceEdit,
};

use crate::document::LineIndex;
use crate::sync::{EditError, Editor};

/// An `Editor` over a document snapshot that queues edits instead of applying them.
#[derive(Debug)]
pub struct QueuedEditor<'a> {
    index: &'a LineIndex,
    edits: Vec<TextEdit>,
}

impl<'a> QueuedEditor<'a> {
    pub fn new(index: &'a LineIndex) -> Self {
        Self {
            index,
            edits: Vec::new(),
        }
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// All queued edits as one workspace edit against `version` of `uri`, or
    /// `None` if nothing was queued.
    pub fn into_workspace_edit(self, uri: &Url, version: i32) -> Option<WorkspaceEdit> {
        if self.edits.is_empty() {
            return None;
        }
        let document_edit = TextDocumentEdit {
            text_document: OptionalVersionedTextDocumentIdentifier {
                uri: uri.clone(),
                version: Some(version),
            },
            edits: self.edits.into_iter().map(OneOf::Left).collect(),
        };
        Some(WorkspaceEdit {
            document_changes: Some(DocumentChanges::Edits(vec![document_edit])),
            ..Default::default()
        })
    }
}

impl Editor for QueuedEditor<'_> {
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
        self.index.check_range(&range)?;
        self.edits.push(TextEdit {
            range: self.index.span_to_range(&range),
            new_text: new_text.to_string(),
        });
        Ok(())
    }
}
