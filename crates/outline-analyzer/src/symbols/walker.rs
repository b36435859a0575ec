//! Depth-first traversal of a declaration snapshot.

use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::Range;

use crate::analysis::{Declaration, DeclarationKind, DeclarationSnapshot, Span};
use crate::document::Document;
use crate::symbols::OutlineError;

/// One visited declaration, positioned in the pre-order arena.
///
/// `parent` indexes the entry of the syntactic parent declaration; both
/// response shapes are assembled from this single arena so they can never
/// disagree about the hierarchy.
#[derive(Clone, Debug)]
pub(crate) struct OutlineEntry {
    pub(crate) name: String,
    pub(crate) kind: DeclarationKind,
    pub(crate) range: Range,
    pub(crate) selection_range: Range,
    pub(crate) parent: Option<usize>,
}

/// Walk every declaration in pre-order, mapping spans to line/character
/// positions as each node is visited.
///
/// The traversal keeps an explicit work stack instead of recursing, so
/// adversarially deep nesting cannot overflow the call stack. The
/// cancellation token is observed on every visit; once cancelled, the walk
/// aborts with [`OutlineError::Cancelled`] and no partial arena escapes.
/// The snapshot is immutable, so re-walking it is deterministic.
pub(crate) fn walk(
    snapshot: &DeclarationSnapshot,
    document: &Document,
    cancel: &CancellationToken,
) -> Result<Vec<OutlineEntry>, OutlineError> {
    let mut entries: Vec<OutlineEntry> = Vec::new();
    let mut stack: Vec<(&Declaration, Option<usize>)> =
        snapshot.declarations().iter().rev().map(|declaration| (declaration, None)).collect();

    while let Some((declaration, parent)) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(OutlineError::Cancelled);
        }

        let range = map_span(declaration.span, document)?;
        let selection_range = map_span(declaration.selection_span, document)?;

        let index = entries.len();
        entries.push(OutlineEntry {
            name: declaration.name.clone(),
            kind: declaration.kind,
            range,
            selection_range,
            parent,
        });

        // Reversed push keeps source order once popped.
        for child in declaration.children.iter().rev() {
            stack.push((child, Some(index)));
        }
    }

    Ok(entries)
}

/// Map an absolute byte span into protocol positions.
///
/// The snapshot is assumed well-formed; a span outside `[0, len]` means the
/// analysis front-end produced garbage and the whole request fails.
fn map_span(
    span: Span,
    document: &Document,
) -> Result<Range, OutlineError> {
    let len = document.len();
    if span.start > span.end || span.end > len {
        return Err(OutlineError::OffsetOutOfRange {
            offset: span.start.max(span.end),
            len,
        });
    }

    Ok(Range {
        start: document.position_of(span.start),
        end: document.position_of(span.end),
    })
}

#[cfg(test)]
#[path = "../../tests/src/symbols/walker_tests.rs"]
mod tests;
