use super::*;
use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::DocumentSymbolResponse;

use crate::analysis::{Declaration, DeclarationKind, Span};

const TEXT: &str = "class A {\n  void M() {\n  }\n}\n";

fn doc() -> Document {
    Document::new(Url::parse("file:///provider.src").unwrap(), TEXT.to_string(), 1)
}

fn snapshot() -> DeclarationSnapshot {
    let method = Declaration::new(DeclarationKind::Method, "M", Span::new(12, 26), Span::new(17, 18));
    let class = Declaration::new(DeclarationKind::Class, "A", Span::new(0, 28), Span::new(6, 7))
        .with_children(vec![method]);
    DeclarationSnapshot::new(vec![class])
}

#[test]
fn hierarchical_mode_nests() {
    let provider = OutlineProvider::new();
    let response = provider
        .document_outline(&doc().uri, &snapshot(), &doc(), OutlineMode::Hierarchical, &CancellationToken::new())
        .unwrap();

    let DocumentSymbolResponse::Nested(roots) = response else {
        panic!("hierarchical mode must produce the nested shape");
    };
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].name, "A");
    assert_eq!(roots[0].children.as_ref().unwrap()[0].name, "M");
}

#[test]
fn flat_mode_lists() {
    let provider = OutlineProvider::new();
    let response = provider
        .document_outline(&doc().uri, &snapshot(), &doc(), OutlineMode::Flat, &CancellationToken::new())
        .unwrap();

    let DocumentSymbolResponse::Flat(records) = response else {
        panic!("flat mode must produce the flat shape");
    };
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].name, "M()");
    assert_eq!(records[1].container_name.as_deref(), Some("A"));
}

#[test]
fn empty_snapshot_is_an_empty_sequence_not_an_error() {
    let provider = OutlineProvider::new();

    let nested = provider
        .document_outline(&doc().uri, &DeclarationSnapshot::empty(), &doc(), OutlineMode::Hierarchical, &CancellationToken::new())
        .unwrap();
    assert!(matches!(nested, DocumentSymbolResponse::Nested(roots) if roots.is_empty()));

    let flat = provider
        .document_outline(&doc().uri, &DeclarationSnapshot::empty(), &doc(), OutlineMode::Flat, &CancellationToken::new())
        .unwrap();
    assert!(matches!(flat, DocumentSymbolResponse::Flat(records) if records.is_empty()));
}

#[test]
fn cancellation_propagates_as_distinct_outcome() {
    let provider = OutlineProvider::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = provider.document_outline(&doc().uri, &snapshot(), &doc(), OutlineMode::Flat, &cancel);
    assert_eq!(result.unwrap_err(), OutlineError::Cancelled);
}
