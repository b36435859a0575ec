use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::{
    Client,
    lsp_types::{ClientCapabilities, Url},
};
use tracing::debug;

use crate::{
    analysis::{Analyzer, DeclarationScanner, DeclarationSnapshot, SnapshotStore},
    document::{Document, DocumentStore},
    server::settings::ServerSettings,
    symbols::{OutlineError, OutlineProvider},
};

/// The outline-analyzer backend that implements the Language Server Protocol.
pub struct OutlineLanguageServer {
    /// The LSP client handle, used to send notifications back to the editor.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Latest declaration snapshot per open document.
    pub(crate) snapshot_store: Arc<SnapshotStore>,

    /// Analysis front-end refreshing snapshots on open/change.
    pub(crate) analyzer: Arc<dyn Analyzer>,

    /// Builds hierarchical or flat document symbols from a snapshot.
    pub(crate) outline_provider: Arc<OutlineProvider>,

    /// Capabilities the client declared during `initialize`.
    pub(crate) client_capabilities: RwLock<ClientCapabilities>,

    /// Cancellation token of the in-flight outline request per document.
    ///
    /// A newer request or a content change cancels the stale one so a slow
    /// traversal of a large file never outlives the state it was asked about.
    pub(crate) pending_outlines: DashMap<Url, CancellationToken>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl OutlineLanguageServer {
    /// Create a server wired to the given LSP client, using the bundled
    /// declaration scanner as its analysis front-end.
    pub fn new(client: Client) -> Self {
        Self::with_analyzer(client, Arc::new(DeclarationScanner::new()))
    }

    /// Create a server with a custom analysis front-end.
    pub fn with_analyzer(
        client: Client,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            snapshot_store: Arc::new(SnapshotStore::new()),
            analyzer,
            outline_provider: Arc::new(OutlineProvider::new()),
            client_capabilities: RwLock::new(ClientCapabilities::default()),
            pending_outlines: DashMap::new(),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        *self.settings.write().await = settings;
    }

    /// Resolve a request URI to the snapshot and line-index pair it was
    /// asked about.
    ///
    /// Both stores must know the document; a miss in either means the URI
    /// does not resolve within the current editor state.
    pub(crate) fn resolve_document(
        &self,
        uri: &Url,
    ) -> Result<(Arc<DeclarationSnapshot>, Document), OutlineError> {
        let document =
            self.document_store.get(uri).ok_or_else(|| OutlineError::DocumentNotFound(uri.clone()))?;
        let snapshot =
            self.snapshot_store.get(uri).ok_or_else(|| OutlineError::DocumentNotFound(uri.clone()))?;
        Ok((snapshot, document))
    }

    /// Register a fresh cancellation token for an outline request,
    /// cancelling any in-flight request for the same document.
    pub(crate) fn begin_outline(
        &self,
        uri: &Url,
    ) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.pending_outlines.insert(uri.clone(), token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancel whatever outline request is in flight for the document.
    pub(crate) fn cancel_pending_outline(
        &self,
        uri: &Url,
    ) {
        if let Some((_, pending)) = self.pending_outlines.remove(uri) {
            pending.cancel();
        }
    }

    /// Refresh the declaration snapshot after a content change.
    ///
    /// Oversized files get an empty snapshot instead of stalling the event
    /// loop on a scan nobody asked for. Any outline request in flight is
    /// cancelled: it was computed against text that no longer exists.
    pub(crate) async fn reanalyze(
        &self,
        uri: &Url,
        text: &str,
    ) {
        self.cancel_pending_outline(uri);

        let max_bytes = self.settings_snapshot().await.scanner.max_file_size_bytes();
        let snapshot = if text.len() as u64 > max_bytes {
            debug!("skipping analysis of {} ({} bytes over limit)", uri.path(), text.len());
            DeclarationSnapshot::empty()
        } else {
            self.analyzer.analyze(text)
        };

        self.snapshot_store.insert(uri.clone(), snapshot);
    }
}
