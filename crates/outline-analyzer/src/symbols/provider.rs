use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::{DocumentSymbolResponse, Url};
use tracing::debug;

use crate::analysis::DeclarationSnapshot;
use crate::document::Document;
use crate::symbols::{builder, walker, OutlineError, OutlineMode};

/// The document symbol provider.
///
/// Stateless: every request is an independent computation over an immutable
/// snapshot, so one provider instance serves concurrent requests without
/// locking. The output tree or list is owned by the in-flight request and
/// dropped after serialization.
pub struct OutlineProvider;

impl Default for OutlineProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineProvider {
    pub fn new() -> Self {
        Self
    }

    /// Produce the outline for one document-symbol request.
    ///
    /// Walks the snapshot once, then assembles the shape the negotiated mode
    /// asks for. An empty snapshot yields an empty sequence in either mode,
    /// never an error.
    pub fn document_outline(
        &self,
        uri: &Url,
        snapshot: &DeclarationSnapshot,
        document: &Document,
        mode: OutlineMode,
        cancel: &CancellationToken,
    ) -> Result<DocumentSymbolResponse, OutlineError> {
        let entries = walker::walk(snapshot, document, cancel)?;
        debug!("outline: {} declarations in {} ({mode:?})", entries.len(), uri.path());

        Ok(match mode {
            OutlineMode::Hierarchical => DocumentSymbolResponse::Nested(builder::build_hierarchical(&entries)),
            OutlineMode::Flat => DocumentSymbolResponse::Flat(builder::build_flat(&entries, uri)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/provider_tests.rs"]
mod tests;
