pub mod analysis;
pub mod document;
pub mod server;
pub mod symbols;

pub use analysis::{Analyzer, Declaration, DeclarationKind, DeclarationScanner, DeclarationSnapshot, SnapshotStore, Span};
pub use document::{Document, DocumentStore};
pub use server::OutlineLanguageServer;
pub use symbols::{OutlineError, OutlineMode, OutlineProvider};
