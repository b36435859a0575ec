use super::*;

fn scan_text(text: &str) -> DeclarationSnapshot {
    DeclarationScanner::new().scan(text)
}

fn names(declarations: &[Declaration]) -> Vec<&str> {
    declarations.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn empty_input_scans_to_empty_snapshot() {
    assert!(scan_text("").is_empty());
    assert!(scan_text("// nothing but a comment\n").is_empty());
}

#[test]
fn class_with_members_nests() {
    let src = "\
class Shape {
    int sides;
    Shape() {
    }
    int area() {
        return 0;
    }
}
";
    let snapshot = scan_text(src);
    let roots = snapshot.declarations();
    assert_eq!(names(roots), vec!["Shape"]);
    assert_eq!(roots[0].kind, DeclarationKind::Class);

    let members = &roots[0].children;
    assert_eq!(names(members), vec!["sides", "Shape", "area"]);
    assert_eq!(members[0].kind, DeclarationKind::Field);
    assert_eq!(members[1].kind, DeclarationKind::Constructor);
    assert_eq!(members[2].kind, DeclarationKind::Method);
}

#[test]
fn namespace_nesting_goes_deeper_than_two_levels() {
    let src = "\
namespace Outer {
    namespace Inner {
        class Deep {
            void touch() {
            }
        }
    }
}
";
    let snapshot = scan_text(src);
    let outer = &snapshot.declarations()[0];
    assert_eq!(outer.kind, DeclarationKind::Namespace);
    let inner = &outer.children[0];
    assert_eq!(inner.name, "Inner");
    let deep = &inner.children[0];
    assert_eq!(deep.name, "Deep");
    assert_eq!(deep.children[0].name, "touch");
    assert_eq!(deep.children[0].kind, DeclarationKind::Method);
}

#[test]
fn enum_members_are_collected_in_order() {
    let src = "\
enum Color {
    Zebra,
    Apple = 3,
    Mango
}
";
    let snapshot = scan_text(src);
    let color = &snapshot.declarations()[0];
    assert_eq!(color.kind, DeclarationKind::Enum);
    // Source order, not alphabetical.
    assert_eq!(names(&color.children), vec!["Zebra", "Apple", "Mango"]);
    assert!(color.children.iter().all(|m| m.kind == DeclarationKind::EnumMember));
}

#[test]
fn interface_prototypes_end_at_semicolon() {
    let src = "\
interface Drawable {
    void draw();
    int layer();
}
";
    let snapshot = scan_text(src);
    let drawable = &snapshot.declarations()[0];
    assert_eq!(drawable.kind, DeclarationKind::Interface);
    assert_eq!(names(&drawable.children), vec!["draw", "layer"]);
    for method in &drawable.children {
        assert_eq!(method.kind, DeclarationKind::Method);
        assert!(method.span.end < drawable.span.end);
    }
}

#[test]
fn top_level_function_and_variable_kinds() {
    let src = "\
int counter = 0;
const int LIMIT = 10;
int add(int a, int b) {
    return a + b;
}
";
    let snapshot = scan_text(src);
    let roots = snapshot.declarations();
    assert_eq!(names(roots), vec!["counter", "LIMIT", "add"]);
    assert_eq!(roots[0].kind, DeclarationKind::Variable);
    assert_eq!(roots[1].kind, DeclarationKind::Constant);
    assert_eq!(roots[2].kind, DeclarationKind::Function);
}

#[test]
fn locals_inside_bodies_are_not_collected() {
    let src = "\
void work() {
    int local = 1;
    if (local > 0) {
        int deeper = 2;
    }
}
";
    let snapshot = scan_text(src);
    assert_eq!(snapshot.declaration_count(), 1);
    assert_eq!(snapshot.declarations()[0].name, "work");
}

#[test]
fn comments_and_strings_do_not_declare() {
    let src = "\
// class Commented {
/* struct AlsoCommented { */
const char* label = \"class Fake {\";
";
    let snapshot = scan_text(src);
    assert_eq!(names(snapshot.declarations()), vec!["label"]);
    assert_eq!(snapshot.declarations()[0].kind, DeclarationKind::Constant);
}

#[test]
fn type_aliases_from_using_and_typedef() {
    let src = "\
using Watts = double;
using System.Text;
typedef unsigned long size_type;
";
    let snapshot = scan_text(src);
    let roots = snapshot.declarations();
    assert_eq!(names(roots), vec!["Watts", "size_type"]);
    assert!(roots.iter().all(|d| d.kind == DeclarationKind::TypeAlias));
}

#[test]
fn selection_span_covers_only_the_name_token() {
    let src = "class Shape {\n}\n";
    let snapshot = scan_text(src);
    let shape = &snapshot.declarations()[0];

    assert_eq!(&src[shape.selection_span.start..shape.selection_span.end], "Shape");
    assert!(shape.span.contains(shape.selection_span));
    assert_eq!(shape.span.start, 0);
    assert_eq!(shape.span.end, src.rfind('}').unwrap() + 1);
}

#[test]
fn brace_on_following_line_still_opens_the_body() {
    let src = "\
class Shape
{
    int sides;
}
";
    let snapshot = scan_text(src);
    let shape = &snapshot.declarations()[0];
    assert_eq!(shape.name, "Shape");
    assert_eq!(names(&shape.children), vec!["sides"]);
    assert_eq!(shape.span.end, src.rfind('}').unwrap() + 1);
}

#[test]
fn unterminated_body_closes_at_end_of_input() {
    let src = "class Broken {\n    int x;\n";
    let snapshot = scan_text(src);
    let broken = &snapshot.declarations()[0];
    assert_eq!(broken.span.end, src.len());
    assert_eq!(names(&broken.children), vec!["x"]);
}

#[test]
fn forward_declaration_closes_at_semicolon() {
    let src = "class Forward;\nclass Real {\n}\n";
    let snapshot = scan_text(src);
    let roots = snapshot.declarations();
    assert_eq!(names(roots), vec!["Forward", "Real"]);
    assert!(roots[0].children.is_empty());
    assert_eq!(roots[0].span.end, src.find(';').unwrap() + 1);
}

#[test]
fn properties_with_inline_braces() {
    let src = "\
class Config {
    public int Retries { get; set; }
}
";
    let snapshot = scan_text(src);
    let config = &snapshot.declarations()[0];
    assert_eq!(names(&config.children), vec!["Retries"]);
    assert_eq!(config.children[0].kind, DeclarationKind::Property);
}

#[test]
fn preprocessor_and_imports_declare_nothing() {
    let src = "\
#include <memory>
#define LIMIT 64
import os;
using System.Collections;
";
    assert!(scan_text(src).is_empty());
}
