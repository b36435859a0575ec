//! Assembly of the two response shapes from one walker arena.

use tower_lsp::lsp_types::{DocumentSymbol, Location, SymbolInformation, Url};

use crate::symbols::classifier;
use crate::symbols::walker::OutlineEntry;
use crate::symbols::OutlineMode;

/// Assemble nested symbol trees.
///
/// Children are attached bottom-up: a child always has a larger arena index
/// than its parent, so one reverse pass moves every completed node into its
/// parent exactly once, without mutable back-references to unfinished
/// parents. Leaves keep an empty (never absent) children vector so the
/// response shape stays uniform for client deserializers.
pub(crate) fn build_hierarchical(entries: &[OutlineEntry]) -> Vec<DocumentSymbol> {
    let mut nodes: Vec<Option<DocumentSymbol>> = entries.iter().map(|entry| Some(symbol_node(entry))).collect();

    for index in (0..entries.len()).rev() {
        let Some(parent) = entries[index].parent else {
            continue;
        };
        let Some(mut child) = nodes[index].take() else {
            continue;
        };
        // Children arrived in reverse while this node was being filled.
        if let Some(children) = child.children.as_mut() {
            children.reverse();
        }
        if let Some(children) = nodes[parent].as_mut().and_then(|node| node.children.as_mut()) {
            children.push(child);
        }
    }

    let mut roots: Vec<DocumentSymbol> = nodes.into_iter().flatten().collect();
    for root in &mut roots {
        if let Some(children) = root.children.as_mut() {
            children.reverse();
        }
    }
    roots
}

/// Assemble the flat legacy list.
///
/// Emission order equals arena (pre-order) order: a parent immediately
/// precedes its descendants. The container name is the bare display name of
/// the nearest enclosing declaration, which keeps the two response shapes in
/// agreement about the hierarchy.
pub(crate) fn build_flat(
    entries: &[OutlineEntry],
    uri: &Url,
) -> Vec<SymbolInformation> {
    entries
        .iter()
        .map(|entry| {
            #[allow(deprecated)]
            SymbolInformation {
                name: classifier::display_name(&entry.name, entry.kind, OutlineMode::Flat),
                kind: classifier::symbol_kind(entry.kind),
                tags: None,
                deprecated: None,
                location: Location {
                    uri: uri.clone(),
                    range: entry.range,
                },
                container_name: entry.parent.map(|parent| entries[parent].name.clone()),
            }
        })
        .collect()
}

fn symbol_node(entry: &OutlineEntry) -> DocumentSymbol {
    DocumentSymbol {
        name: classifier::display_name(&entry.name, entry.kind, OutlineMode::Hierarchical),
        detail: None,
        kind: classifier::symbol_kind(entry.kind),
        tags: None,
        #[allow(deprecated)]
        deprecated: None,
        range: entry.range,
        selection_range: entry.selection_range,
        children: Some(Vec::new()),
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/builder_tests.rs"]
mod tests;
