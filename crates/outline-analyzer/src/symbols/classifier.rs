//! Declaration-kind classification and display-name rendering.

use tower_lsp::lsp_types::SymbolKind;

use crate::analysis::DeclarationKind;
use crate::symbols::OutlineMode;

/// Map a declaration kind onto the protocol enumeration.
///
/// Total by construction: kinds this mapping does not name resolve to the
/// protocol's `NULL` sentinel rather than failing, so no declaration is ever
/// dropped for having an exotic kind.
pub(crate) fn symbol_kind(kind: DeclarationKind) -> SymbolKind {
    match kind {
        DeclarationKind::Namespace => SymbolKind::NAMESPACE,
        DeclarationKind::Class => SymbolKind::CLASS,
        DeclarationKind::Struct => SymbolKind::STRUCT,
        DeclarationKind::Interface => SymbolKind::INTERFACE,
        DeclarationKind::Enum => SymbolKind::ENUM,
        DeclarationKind::EnumMember => SymbolKind::ENUM_MEMBER,
        DeclarationKind::Method => SymbolKind::METHOD,
        DeclarationKind::Function => SymbolKind::FUNCTION,
        DeclarationKind::Constructor => SymbolKind::CONSTRUCTOR,
        DeclarationKind::Field => SymbolKind::FIELD,
        DeclarationKind::Property => SymbolKind::PROPERTY,
        DeclarationKind::Variable => SymbolKind::VARIABLE,
        DeclarationKind::Constant => SymbolKind::CONSTANT,
        DeclarationKind::TypeAlias => SymbolKind::TYPE_PARAMETER,
        DeclarationKind::Other => SymbolKind::NULL,
    }
}

/// Render the display name for one declaration.
///
/// Hierarchical responses carry the bare identifier. The flat legacy shape
/// suffixes callable declarations with an empty parameter list, matching the
/// loose convention of clients that reconstruct signatures themselves.
pub(crate) fn display_name(
    name: &str,
    kind: DeclarationKind,
    mode: OutlineMode,
) -> String {
    match mode {
        OutlineMode::Flat if is_callable(kind) => format!("{name}()"),
        _ => name.to_string(),
    }
}

fn is_callable(kind: DeclarationKind) -> bool {
    matches!(
        kind,
        DeclarationKind::Method | DeclarationKind::Function | DeclarationKind::Constructor
    )
}

#[cfg(test)]
#[path = "../../tests/src/symbols/classifier_tests.rs"]
mod tests;
