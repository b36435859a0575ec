use super::*;
use tower_lsp::lsp_types::{Position, Url};

// Synthetic snapshot over this fixed text; offsets index into it directly.
//
//   0         1         2
//   0123456789012345678901234567
const TEXT: &str = "class A {\n  int z;\n  int a;\n}\n";

fn doc() -> Document {
    Document::new(Url::parse("file:///walk.src").unwrap(), TEXT.to_string(), 1)
}

fn class_with_fields() -> DeclarationSnapshot {
    // Children deliberately out of alphabetical order: z before a.
    let z = Declaration::new(DeclarationKind::Field, "z", Span::new(12, 18), Span::new(16, 17));
    let a = Declaration::new(DeclarationKind::Field, "a", Span::new(21, 27), Span::new(25, 26));
    let class = Declaration::new(DeclarationKind::Class, "A", Span::new(0, 29), Span::new(6, 7))
        .with_children(vec![z, a]);
    DeclarationSnapshot::new(vec![class])
}

#[test]
fn preorder_with_parent_indices() {
    let entries = walk(&class_with_fields(), &doc(), &CancellationToken::new()).unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "z", "a"]);

    assert_eq!(entries[0].parent, None);
    assert_eq!(entries[1].parent, Some(0));
    assert_eq!(entries[2].parent, Some(0));
}

#[test]
fn child_order_matches_source_not_alphabet() {
    let entries = walk(&class_with_fields(), &doc(), &CancellationToken::new()).unwrap();
    // "z" is declared first and must stay first.
    assert_eq!(entries[1].name, "z");
    assert_eq!(entries[2].name, "a");
    assert!(entries[1].range.start < entries[2].range.start);
}

#[test]
fn ranges_map_to_lines_and_characters() {
    let entries = walk(&class_with_fields(), &doc(), &CancellationToken::new()).unwrap();

    let class = &entries[0];
    assert_eq!(class.range.start, Position::new(0, 0));
    assert_eq!(class.range.end, Position::new(3, 1));
    assert_eq!(class.selection_range.start, Position::new(0, 6));
    assert_eq!(class.selection_range.end, Position::new(0, 7));

    let z = &entries[1];
    assert_eq!(z.range.start, Position::new(1, 2));
    assert_eq!(z.selection_range.start, Position::new(1, 6));
}

#[test]
fn selection_always_inside_full_range() {
    let entries = walk(&class_with_fields(), &doc(), &CancellationToken::new()).unwrap();
    for entry in &entries {
        assert!(entry.range.start <= entry.selection_range.start);
        assert!(entry.selection_range.end <= entry.range.end);
    }
}

#[test]
fn empty_snapshot_walks_to_nothing() {
    let entries = walk(&DeclarationSnapshot::empty(), &doc(), &CancellationToken::new()).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn cancelled_token_aborts_without_partial_output() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = walk(&class_with_fields(), &doc(), &cancel);
    assert_eq!(result.unwrap_err(), OutlineError::Cancelled);
}

#[test]
fn span_past_end_of_document_is_a_defect() {
    let bad = DeclarationSnapshot::new(vec![Declaration::new(
        DeclarationKind::Class,
        "A",
        Span::new(0, TEXT.len() + 5),
        Span::new(6, 7),
    )]);

    let result = walk(&bad, &doc(), &CancellationToken::new());
    assert_eq!(
        result.unwrap_err(),
        OutlineError::OffsetOutOfRange {
            offset: TEXT.len() + 5,
            len: TEXT.len(),
        }
    );
}

#[test]
fn inverted_span_is_a_defect() {
    let bad = DeclarationSnapshot::new(vec![Declaration::new(
        DeclarationKind::Class,
        "A",
        Span::new(9, 3),
        Span::new(9, 3),
    )]);

    let result = walk(&bad, &doc(), &CancellationToken::new());
    assert!(matches!(result.unwrap_err(), OutlineError::OffsetOutOfRange { .. }));
}

#[test]
fn deep_nesting_does_not_recurse() {
    // Nesting far past the two levels real sources reach; a recursive
    // walker with per-node frames would be at risk here.
    let mut node = Declaration::new(DeclarationKind::Class, "leaf", Span::new(0, 1), Span::new(0, 1));
    for depth in 0..2_000 {
        node = Declaration::new(DeclarationKind::Class, format!("level{depth}"), Span::new(0, 1), Span::new(0, 1))
            .with_children(vec![node]);
    }
    let snapshot = DeclarationSnapshot::new(vec![node]);

    let entries = walk(&snapshot, &doc(), &CancellationToken::new()).unwrap();
    assert_eq!(entries.len(), 2_001);
    // Every entry except the outermost has the previous entry as parent.
    for (index, entry) in entries.iter().enumerate().skip(1) {
        assert_eq!(entry.parent, Some(index - 1));
    }
}
