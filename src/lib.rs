//! Tag sync language server.
//!
//! Keeps the name of a markup closing tag in step with its opening tag while
//! the opening tag is being edited.

use std::sync::OnceLock;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};
use tracing::{debug, info, warn};

mod document;
mod logging;
mod lsp;
pub(crate) mod settings;
pub mod sync;
pub mod tags;

pub use document::{Document, DocumentStore, LineIndex, MemoryBuffer};
pub use logging::init_tracing;
pub use lsp::{QueuedEditor, SelectionChangedParams, SELECTION_CHANGED};
pub use settings::{
    discover_settings, find_settings_file, load_settings, Settings, TagSyncSettings,
};
pub use sync::{EditError, Editor, SyncState, TagSync, TextChange};
pub use tags::{closing_tag_after, find_matching_close, locate_tag_at, tag_at, TagReference};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    settings: OnceLock<Settings>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            settings: OnceLock::new(),
        }
    }

    fn settings(&self) -> &Settings {
        self.settings.get_or_init(Settings::default)
    }

    /// Handle `tagSync/didChangeSelection`.
    pub async fn did_change_selection(&self, params: SelectionChangedParams) {
        self.documents
            .select(&params.text_document.uri, params.selection.start);
    }

    /// Apply a full-text change to a tracked document and build the closing
    /// tag rewrite it calls for.
    fn change_document(&self, params: DidChangeTextDocumentParams) -> Option<WorkspaceEdit> {
        let uri = &params.text_document.uri;
        if !self.documents.is_open(uri) {
            return None;
        }

        // We use FULL sync, so there's exactly one change with the full text
        let change = params.content_changes.into_iter().next()?;
        self.documents
            .change(uri, change.text, params.text_document.version)
    }

    /// Send a closing tag rewrite to the client.
    ///
    /// A refusal is logged and otherwise ignored; the next change re-reads the
    /// actual text.
    async fn submit_edit(&self, uri: &Url, edit: WorkspaceEdit) {
        let error = match self.client.apply_edit(edit).await {
            Ok(response) if response.applied => {
                debug!(%uri, "closing tag update applied");
                return;
            }
            Ok(response) => EditError::Rejected(
                response
                    .failure_reason
                    .unwrap_or_else(|| "no reason given".to_string()),
            ),
            Err(e) => EditError::Rejected(e.to_string()),
        };

        warn!(%uri, "failed to update closing tag: {error}");
        self.client
            .log_message(
                MessageType::WARNING,
                format!("Failed to update closing tag in {uri}: {error}"),
            )
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        if let Some(root) = workspace_root {
            let settings = settings::discover_settings(&root);
            debug!(root = %root.display(), enabled = settings.enabled(), "settings loaded");
            let _ = self.settings.set(settings);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!(enabled = self.settings().enabled(), "tag sync server initialized");
        self.client
            .log_message(MessageType::INFO, "Tag sync server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        if !self.settings().tracks(&doc.uri) {
            debug!(uri = %doc.uri, "document not tracked");
            return;
        }
        self.documents.open(doc.uri, doc.text, doc.version);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Some(edit) = self.change_document(params) {
            self.submit_edit(&uri, edit).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(Backend::new)
        .custom_method(SELECTION_CHANGED, Backend::did_change_selection)
        .finish()
}
