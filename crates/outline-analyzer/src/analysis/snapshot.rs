//! The read-only declaration model consumed by the outline core.

/// Absolute byte-offset span within a document's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when `other` lies entirely within `self`.
    pub fn contains(
        &self,
        other: Span,
    ) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Language-level kind of a declaration, as reported by the analysis
/// front-end. [`DeclarationKind::Other`] covers constructs the front-end
/// recognises but this enumeration does not name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Namespace,
    Class,
    Struct,
    Interface,
    Enum,
    EnumMember,
    Method,
    Function,
    Constructor,
    Field,
    Property,
    Variable,
    Constant,
    TypeAlias,
    Other,
}

/// A named program construct with its source extent.
///
/// `span` covers the whole declaration including the body; `selection_span`
/// covers just the name token and is always contained in `span`. `children`
/// preserve source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub span: Span,
    pub selection_span: Span,
    pub children: Vec<Declaration>,
}

impl Declaration {
    pub fn new(
        kind: DeclarationKind,
        name: impl Into<String>,
        span: Span,
        selection_span: Span,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
            selection_span,
            children: Vec::new(),
        }
    }

    pub fn with_children(
        mut self,
        children: Vec<Declaration>,
    ) -> Self {
        self.children = children;
        self
    }
}

/// Immutable result of analysing one document version.
///
/// Holds the ordered top-level declarations; everything below hangs off
/// their `children`. Shared between tasks via `Arc` without copying.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationSnapshot {
    declarations: Vec<Declaration>,
}

impl DeclarationSnapshot {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Total number of declarations, counting every nesting level.
    pub fn declaration_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Declaration> = self.declarations.iter().collect();
        while let Some(declaration) = stack.pop() {
            count += 1;
            stack.extend(declaration.children.iter());
        }
        count
    }
}

#[cfg(test)]
#[path = "../../tests/src/analysis/snapshot_tests.rs"]
mod tests;
