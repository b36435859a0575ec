use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tower_lsp::{LanguageServer, jsonrpc, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    server::{settings::ServerSettings, state::OutlineLanguageServer},
    symbols::{OutlineError, OutlineMode},
};

/// JSON-RPC error code the protocol reserves for cancelled requests.
const REQUEST_CANCELLED: i64 = -32800;

#[tower_lsp::async_trait]
impl LanguageServer for OutlineLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing outline-analyzer...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        // The capability flag that drives hierarchical-vs-flat negotiation
        // arrives exactly once, here.
        *self.client_capabilities.write().await = params.capabilities;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                document_symbol_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "outline-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        let mode = OutlineMode::negotiate(&*self.client_capabilities.read().await);
        info!("outline-analyzer initialized ({mode:?} document symbols)");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down outline-analyzer");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let filename = short_name(&uri);
        let settings = self.settings_snapshot().await;

        info!("Opened {filename} (v{version}, {} bytes)", text.len());
        if settings.logging.level.allows_info() {
            let sent = AssertUnwindSafe(
                self.client.log_message(MessageType::INFO, format!("outline-analyzer: opened {filename}")),
            )
            .catch_unwind()
            .await;
            if sent.is_err() {
                warn!("log_message panicked (client may have disconnected)");
            }
        }

        self.document_store.open(uri.clone(), text.clone(), version);
        self.reanalyze(&uri, &text).await;
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        self.document_store.apply_changes(&uri, params.content_changes, version);
        let Some(text) = self.document_store.get_content(&uri) else {
            debug!("change for untracked document {}", uri.path());
            return;
        };
        self.reanalyze(&uri, &text).await;
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        debug!("Closed {}", short_name(&uri));

        self.cancel_pending_outline(&uri);
        self.snapshot_store.remove(&uri);
        self.document_store.close(&uri);
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated outline-analyzer settings");
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        // Mode selection is a pure decision over the declared capabilities,
        // made before traversal begins.
        let mode = OutlineMode::negotiate(&*self.client_capabilities.read().await);

        let (snapshot, document) = self.resolve_document(&uri).map_err(rpc_error)?;
        let cancel = self.begin_outline(&uri);
        let response = self
            .outline_provider
            .document_outline(&uri, &snapshot, &document, mode, &cancel)
            .map_err(rpc_error)?;

        Ok(Some(response))
    }
}

/// Map an outline failure onto the wire error taxonomy. Cancellation stays
/// distinguishable from both success and failure so a client never mistakes
/// an aborted request for "document has no symbols".
fn rpc_error(error: OutlineError) -> jsonrpc::Error {
    let code = match &error {
        OutlineError::Cancelled => jsonrpc::ErrorCode::ServerError(REQUEST_CANCELLED),
        OutlineError::DocumentNotFound(_) => jsonrpc::ErrorCode::InvalidParams,
        OutlineError::OffsetOutOfRange {
            ..
        } => {
            warn!("analysis front-end produced an out-of-bounds span: {error}");
            jsonrpc::ErrorCode::InternalError
        },
    };

    jsonrpc::Error {
        code,
        message: error.to_string().into(),
        data: None,
    }
}

fn short_name(uri: &Url) -> String {
    uri.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("<unknown>")
        .to_string()
}
