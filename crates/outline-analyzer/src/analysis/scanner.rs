//! Lightweight declaration scanner for curly-brace sources.
//!
//! A line-oriented, regex-based front-end that recognises container
//! declarations (namespace, class, struct, interface, enum) and their
//! members by tracking brace depth, without a full parse. It trades
//! precision for speed: strings and comments are masked before matching,
//! locals inside function bodies are ignored, and multi-declaration lines
//! contribute at most one symbol. Embedders with a real semantic engine
//! should implement [`Analyzer`] themselves and skip this type entirely.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{Analyzer, Declaration, DeclarationKind, DeclarationSnapshot, Span};

static CONTAINER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|private|protected|internal|static|abstract|sealed|partial|final|export)\s+)*(?P<keyword>namespace|class|struct|interface|enum)\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("container regex must compile")
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[^()={};]*?)\b(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\(")
        .expect("method regex must compile")
});

static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|abstract)\s+)*[A-Za-z_][A-Za-z0-9_:<>,\[\]\s\*&]*?\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\{",
    )
    .expect("property regex must compile")
});

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|private|protected|internal|static|const|readonly|final|mutable|volatile)\s+)*[A-Za-z_][A-Za-z0-9_:<>,\[\]\s\*&]*?\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*(?:\[[^\]]*\]\s*)?(?:=[^;]*)?;",
    )
    .expect("field regex must compile")
});

static ENUM_MEMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*(?:=[^,]*)?,?\s*$")
        .expect("enum member regex must compile")
});

static USING_ALIAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*using\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*=").expect("using alias regex must compile")
});

static TYPEDEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*typedef\s+[^;]*?(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*;")
        .expect("typedef regex must compile")
});

/// Identifiers that look like call sites but never name a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "return", "catch", "using", "sizeof", "new", "throw",
];

/// The bundled [`Analyzer`] implementation.
pub struct DeclarationScanner;

impl DeclarationScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(
        &self,
        text: &str,
    ) -> DeclarationSnapshot {
        scan(text)
    }
}

impl Default for DeclarationScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for DeclarationScanner {
    fn analyze(
        &self,
        text: &str,
    ) -> DeclarationSnapshot {
        scan(text)
    }
}

/// A declaration under construction; `span.end` is patched when the
/// enclosing scope closes.
struct ScanDecl {
    kind: DeclarationKind,
    name: String,
    span: Span,
    selection_span: Span,
    parent: Option<usize>,
}

fn scan(text: &str) -> DeclarationSnapshot {
    let mut decls: Vec<ScanDecl> = Vec::new();
    // One entry per open '{': the declaration whose body it is, or `None`
    // for plain statement blocks.
    let mut scopes: Vec<Option<usize>> = Vec::new();
    // Declaration whose opening '{' (or terminating ';') has not appeared yet.
    let mut pending: Option<usize> = None;
    let mut in_block_comment = false;

    let mut offset = 0usize;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let masked = mask_noncode(content, &mut in_block_comment);

        if pending.is_none() {
            match_line(&masked, offset, &mut decls, &scopes, &mut pending);
        }

        for (index, byte) in masked.bytes().enumerate() {
            match byte {
                b'{' => {
                    scopes.push(pending.take());
                },
                b'}' => {
                    if let Some(Some(decl)) = scopes.pop() {
                        decls[decl].span.end = offset + index + 1;
                    }
                },
                b';' => {
                    if let Some(decl) = pending.take() {
                        decls[decl].span.end = offset + index + 1;
                    }
                },
                _ => {},
            }
        }

        offset += line.len();
    }

    // Unterminated input: close whatever is still open at end of text.
    for scope in scopes.into_iter().flatten() {
        decls[scope].span.end = text.len();
    }
    if let Some(decl) = pending {
        decls[decl].span.end = text.len();
    }

    into_snapshot(decls)
}

fn match_line(
    masked: &str,
    offset: usize,
    decls: &mut Vec<ScanDecl>,
    scopes: &[Option<usize>],
    pending: &mut Option<usize>,
) {
    let parent = current_parent(scopes);
    let parent_kind = parent.map(|index| decls[index].kind);

    // Locals and statements inside bodies are not collected.
    if matches!(
        parent_kind,
        Some(
            DeclarationKind::Method
                | DeclarationKind::Function
                | DeclarationKind::Constructor
                | DeclarationKind::Property
        )
    ) {
        return;
    }

    let trimmed = masked.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with("import ") {
        return;
    }

    if let Some(captures) = CONTAINER_RE.captures(masked) {
        let kind = match &captures["keyword"] {
            "namespace" => DeclarationKind::Namespace,
            "class" => DeclarationKind::Class,
            "struct" => DeclarationKind::Struct,
            "interface" => DeclarationKind::Interface,
            _ => DeclarationKind::Enum,
        };
        *pending = Some(push_decl(decls, kind, masked, offset, &captures, parent));
        return;
    }

    if parent_kind == Some(DeclarationKind::Enum) {
        if let Some(captures) = ENUM_MEMBER_RE.captures(masked) {
            push_decl(decls, DeclarationKind::EnumMember, masked, offset, &captures, parent);
        }
        return;
    }

    if trimmed.starts_with("using") || trimmed.starts_with("typedef") {
        let alias = USING_ALIAS_RE.captures(masked).or_else(|| TYPEDEF_RE.captures(masked));
        if let Some(captures) = alias {
            push_decl(decls, DeclarationKind::TypeAlias, masked, offset, &captures, parent);
        }
        // Plain `using` imports declare nothing.
        return;
    }

    if let Some(captures) = METHOD_RE.captures(masked) {
        let name = &captures["name"];
        if !STATEMENT_KEYWORDS.contains(&name) {
            let kind = match parent_kind {
                Some(DeclarationKind::Class | DeclarationKind::Struct)
                    if parent.is_some_and(|index| decls[index].name == name) =>
                {
                    DeclarationKind::Constructor
                },
                Some(
                    DeclarationKind::Class | DeclarationKind::Struct | DeclarationKind::Interface,
                ) => DeclarationKind::Method,
                _ => DeclarationKind::Function,
            };
            *pending = Some(push_decl(decls, kind, masked, offset, &captures, parent));
            return;
        }
    }

    let inside_type = matches!(
        parent_kind,
        Some(DeclarationKind::Class | DeclarationKind::Struct | DeclarationKind::Interface)
    );

    if inside_type {
        if let Some(captures) = PROPERTY_RE.captures(masked) {
            *pending = Some(push_decl(decls, DeclarationKind::Property, masked, offset, &captures, parent));
            return;
        }
    }

    if let Some(captures) = FIELD_RE.captures(masked) {
        let kind = if is_constant_line(masked) {
            DeclarationKind::Constant
        } else if inside_type {
            DeclarationKind::Field
        } else {
            DeclarationKind::Variable
        };
        push_decl(decls, kind, masked, offset, &captures, parent);
    }
}

fn push_decl(
    decls: &mut Vec<ScanDecl>,
    kind: DeclarationKind,
    masked: &str,
    offset: usize,
    captures: &regex::Captures<'_>,
    parent: Option<usize>,
) -> usize {
    let name = captures.name("name").expect("all scanner regexes capture a name");
    let start = offset + (masked.len() - masked.trim_start().len());
    let selection_span = Span::new(offset + name.start(), offset + name.end());

    decls.push(ScanDecl {
        kind,
        name: name.as_str().to_string(),
        // End is provisional until the scope closes.
        span: Span::new(start, offset + masked.trim_end().len()),
        selection_span,
        parent,
    });
    decls.len() - 1
}

fn current_parent(scopes: &[Option<usize>]) -> Option<usize> {
    scopes.iter().rev().find_map(|scope| *scope)
}

fn is_constant_line(masked: &str) -> bool {
    masked.split_whitespace().any(|word| word == "const" || word == "readonly" || word == "constexpr")
}

/// Replace comment and string-literal bytes with spaces so that brace
/// tracking and the declaration regexes only see code. Byte offsets are
/// preserved, which keeps captured name positions valid in the original
/// text. String state does not carry across lines.
fn mask_noncode(
    line: &str,
    in_block_comment: &mut bool,
) -> String {
    let bytes = line.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut in_string: Option<u8> = None;
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];

        if *in_block_comment {
            if byte == b'*' && bytes.get(index + 1) == Some(&b'/') {
                *in_block_comment = false;
                out.extend_from_slice(b"  ");
                index += 2;
            } else {
                out.push(b' ');
                index += 1;
            }
            continue;
        }

        if let Some(quote) = in_string {
            if byte == b'\\' && index + 1 < bytes.len() {
                out.extend_from_slice(b"  ");
                index += 2;
            } else {
                if byte == quote {
                    in_string = None;
                }
                out.push(b' ');
                index += 1;
            }
            continue;
        }

        match byte {
            b'/' if bytes.get(index + 1) == Some(&b'/') => {
                out.resize(bytes.len(), b' ');
                index = bytes.len();
            },
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                *in_block_comment = true;
                out.extend_from_slice(b"  ");
                index += 2;
            },
            b'"' | b'\'' => {
                in_string = Some(byte);
                out.push(b' ');
                index += 1;
            },
            _ => {
                out.push(byte);
                index += 1;
            },
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Assemble the parent-indexed arena into a nested snapshot. Children have
/// strictly larger indices than their parent, so a reverse pass can attach
/// each completed node exactly once.
fn into_snapshot(decls: Vec<ScanDecl>) -> DeclarationSnapshot {
    let count = decls.len();
    let mut pending_children: Vec<Vec<Declaration>> = (0..count).map(|_| Vec::new()).collect();
    let mut roots: Vec<Declaration> = Vec::new();

    for index in (0..count).rev() {
        let decl = &decls[index];
        let mut children = std::mem::take(&mut pending_children[index]);
        children.reverse();

        let node = Declaration {
            kind: decl.kind,
            name: decl.name.clone(),
            span: decl.span,
            selection_span: decl.selection_span,
            children,
        };

        match decl.parent {
            Some(parent) => pending_children[parent].push(node),
            None => roots.push(node),
        }
    }

    roots.reverse();
    DeclarationSnapshot::new(roots)
}

#[cfg(test)]
#[path = "../../tests/src/analysis/scanner_tests.rs"]
mod tests;
