pub(crate) mod scanner;
pub(crate) mod snapshot;
pub(crate) mod store;

pub use scanner::DeclarationScanner;
pub use snapshot::{Declaration, DeclarationKind, DeclarationSnapshot, Span};
pub use store::SnapshotStore;

/// Analysis front-end: turns the full text of one document version into an
/// immutable declaration snapshot.
///
/// The outline core never parses source text itself; it only walks whatever
/// snapshot the configured analyzer produced. Embedders with a real semantic
/// engine implement this trait; the bundled [`DeclarationScanner`] is a
/// lightweight fallback for curly-brace sources.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> DeclarationSnapshot;
}
