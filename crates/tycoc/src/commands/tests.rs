use pretty_assertions::assert_eq;
use tyco_diagnostic::ErrorCode;

use super::*;

fn manifest(text: &str) -> Manifest {
    Manifest::parse(text).unwrap()
}

const SHAPES: &str = r#"
[[types]]
raw = "Shape"
owner = "com.acme"
abstract = true

[[types]]
raw = "Circle"
owner = "com.acme"
parent = "Shape"
fields = [{ name = "radius", type = "Double" }]

[[types]]
raw = "Node"
owner = "com.acme"
params = ["T"]
parent = "Shape"
fields = [{ name = "value", type = "T" }, { name = "next", type = "Node<T>" }]
"#;

fn codes(report: &Report) -> Vec<ErrorCode> {
    report.diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn check_passes_a_consistent_manifest() {
    let report = check(&manifest(SHAPES));
    assert!(!report.has_errors());
    assert_eq!(
        report.output,
        "OK: 14 descriptors (11 builtin), 11 concrete codecs, 1 generic\n"
    );
}

#[test]
fn check_reports_unresolvable_fields() {
    let report = check(&manifest(
        "[[types]]\nraw = \"Holder\"\nfields = [{ name = \"x\", type = \"Ghost\" }]\n",
    ));
    assert!(report.has_errors());
    assert_eq!(codes(&report), [ErrorCode::E2003]);
    assert!(report.output.is_empty());
}

#[test]
fn check_reports_missing_parent() {
    let report = check(&manifest("[[types]]\nraw = \"Circle\"\nparent = \"Shape\"\n"));
    assert_eq!(codes(&report), [ErrorCode::E1001]);
}

#[test]
fn warnings_do_not_fail_check() {
    let report = check(&manifest("[[types]]\nraw = \"String\"\nowner = \"com.acme\"\n"));
    assert!(!report.has_errors());
    assert_eq!(codes(&report), [ErrorCode::W1001]);
}

#[test]
fn dump_lists_bindings_and_generics() {
    let report = dump(&manifest(SHAPES));
    let lines: Vec<&str> = report.output.lines().collect();

    assert_eq!(lines[0], "concrete:");
    assert!(lines.contains(&"  ArrayList: TYCO_BUILTIN_LISTCODEC"));
    assert!(lines.contains(&"  Circle: COM_ACME_CIRCLECODEC (parent: Shape)"));
    assert!(lines.contains(&"  Shape: COM_ACME_SHAPECODEC (abstract)"));
    assert_eq!(lines[lines.len() - 2], "generic:");
    assert_eq!(lines[lines.len() - 1], "  Node<T>: COM_ACME_NODECODEC");
}

#[test]
fn resolve_prints_the_codec_graph() {
    let report = resolve(&manifest(SHAPES), &["Node<String>".to_owned()]);
    assert!(!report.has_errors());
    assert_eq!(
        report.output,
        "Node<String>: COM_ACME_NODECODEC\n\
         \x20 Node<String>\n\
         \x20   [0] String: TYCO_BUILTIN_STRINGCODEC\n\
         \x20   .value String: TYCO_BUILTIN_STRINGCODEC\n\
         \x20   .next Node<String>: COM_ACME_NODECODEC\n\
         \x20   ^ Shape\n"
    );
}

#[test]
fn resolve_continues_past_failures() {
    let report = resolve(
        &manifest(SHAPES),
        &[
            "Node<".to_owned(),
            "Node<String, Long>".to_owned(),
            "Integer".to_owned(),
        ],
    );
    assert_eq!(codes(&report), [ErrorCode::E0001, ErrorCode::E2001]);
    assert_eq!(report.output, "Integer: TYCO_BUILTIN_INTEGERCODEC\n");
}
