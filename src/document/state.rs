//! Document state management for the tag sync server.

use dashmap::DashMap;
use tower_lsp::lsp_types::{Position, Url, WorkspaceEdit};
use tracing::debug;

use super::text::LineIndex;
use crate::lsp::QueuedEditor;
use crate::sync::{TagSync, TextChange};

/// State for a single open document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Current text with its line index.
    pub line_index: LineIndex,
    /// Document version from the client.
    pub version: i32,
    /// Tag tracking session.
    pub sync: TagSync,
}

impl Document {
    pub fn new(text: String, version: i32) -> Self {
        Self {
            line_index: LineIndex::new(text),
            version,
            sync: TagSync::new(),
        }
    }

    /// Move the cursor to `position`. Returns false if the position is out of bounds.
    pub fn select(&mut self, position: Position) -> bool {
        let Some(offset) = self.line_index.position_to_offset(position) else {
            return false;
        };
        self.sync
            .on_selection_changed(&QueuedEditor::new(&self.line_index), offset);
        true
    }

    /// Replace the document text and run tag sync against it.
    ///
    /// Returns the controller's verdict plus the edits it queued.
    pub fn change(&mut self, text: String, version: i32) -> (TextChange, QueuedEditor<'_>) {
        self.line_index = LineIndex::new(text);
        self.version = version;

        let mut editor = QueuedEditor::new(&self.line_index);
        let change = self.sync.on_text_changed(&mut editor);
        (change, editor)
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Start a session for a newly opened document.
    pub fn open(&self, uri: Url, text: String, version: i32) {
        debug!(%uri, version, "document opened");
        self.documents.insert(uri, Document::new(text, version));
    }

    /// Close a document, dropping its session.
    pub fn close(&self, uri: &Url) {
        if self.documents.remove(uri).is_some() {
            debug!(%uri, "document closed");
        }
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    /// Forward a cursor move to the document's session.
    pub fn select(&self, uri: &Url, position: Position) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            if !doc.select(position) {
                debug!(%uri, ?position, "selection outside document");
            }
        }
    }

    /// Apply new full text to a document and collect the closing tag rewrite, if any.
    ///
    /// The rewrite is pinned to `version`; the client drops it if the document
    /// changed again before it arrived.
    pub fn change(&self, uri: &Url, text: String, version: i32) -> Option<WorkspaceEdit> {
        let mut doc = self.documents.get_mut(uri)?;
        let (change, editor) = doc.change(text, version);
        debug!(%uri, version, ?change, "text changed");
        editor.into_workspace_edit(uri, version)
    }

    /// Name of the tag currently tracked in a document.
    pub fn tracked_name(&self, uri: &Url) -> Option<String> {
        let doc = self.documents.get(uri)?;
        doc.sync.tracked().map(|tag| tag.name.clone())
    }
}
