use std::fmt::{self, Display, Formatter};

use tower_lsp::lsp_types::{ClientCapabilities, Url};

/// Response shape for one document-symbol request.
///
/// Chosen once per request, before traversal begins, and threaded through
/// the pipeline explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineMode {
    /// Nested `DocumentSymbol` trees.
    Hierarchical,
    /// Flat `SymbolInformation` records with container names.
    Flat,
}

impl OutlineMode {
    /// Pure decision from the client's declared capabilities.
    ///
    /// Absent or malformed capability data counts as "not supported", so the
    /// conservative default is the flat legacy shape.
    pub fn negotiate(capabilities: &ClientCapabilities) -> Self {
        let hierarchical = capabilities
            .text_document
            .as_ref()
            .and_then(|text_document| text_document.document_symbol.as_ref())
            .and_then(|symbol| symbol.hierarchical_document_symbol_support)
            .unwrap_or(false);

        if hierarchical {
            OutlineMode::Hierarchical
        } else {
            OutlineMode::Flat
        }
    }
}

/// Failure modes of a document-symbol request.
///
/// All variants propagate to the request handler unmodified; none is
/// recovered locally, and a failed request never carries a partial response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlineError {
    /// The request URI does not resolve to an open document.
    DocumentNotFound(Url),
    /// The cancellation signal was observed mid-traversal.
    Cancelled,
    /// A declaration span lies outside the document bounds. This is a defect
    /// in the analysis front-end, not a user-recoverable condition.
    OffsetOutOfRange {
        offset: usize,
        len: usize,
    },
}

impl Display for OutlineError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            OutlineError::DocumentNotFound(uri) => write!(f, "document not found: {uri}"),
            OutlineError::Cancelled => write!(f, "document symbol request cancelled"),
            OutlineError::OffsetOutOfRange {
                offset,
                len,
            } => {
                write!(f, "declaration offset {offset} outside document bounds (length {len})")
            },
        }
    }
}

impl std::error::Error for OutlineError {}

#[cfg(test)]
#[path = "../../tests/src/symbols/types_tests.rs"]
mod tests;
