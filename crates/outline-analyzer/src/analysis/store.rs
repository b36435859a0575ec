use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::DeclarationSnapshot;

/// Latest declaration snapshot per open document.
///
/// `DashMap`-backed so handlers and background tasks can read and replace
/// snapshots concurrently without external locking. Snapshots are stored as
/// `Arc` values; a request keeps its clone alive even if the document is
/// re-analysed mid-flight.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: DashMap<Url, Arc<DeclarationSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: DashMap::new(),
        }
    }

    /// Replace the snapshot for a document version.
    pub fn insert(
        &self,
        uri: Url,
        snapshot: DeclarationSnapshot,
    ) {
        self.snapshots.insert(uri, Arc::new(snapshot));
    }

    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Arc<DeclarationSnapshot>> {
        self.snapshots.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(
        &self,
        uri: &Url,
    ) {
        self.snapshots.remove(uri);
    }
}

#[cfg(test)]
#[path = "../../tests/src/analysis/store_tests.rs"]
mod tests;
