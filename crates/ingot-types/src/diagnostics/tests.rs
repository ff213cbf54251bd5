use ingot_core::Span;

use super::*;

#[test]
fn severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedTypeName, Span::new(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());

    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.kind(), DiagnosticKind::UnresolvedTypeName);
    assert_eq!(message.severity(), Severity::Warning);
    assert_eq!(message.text(), "cannot resolve type name");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedTypeName, Span::new(7, 14))
        .message("Missing")
        .emit();

    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.text(), "cannot resolve type name `Missing`");
    assert_eq!(message.span(), Span::new(7, 14));
}

#[test]
fn unsupported_declaration_is_an_error() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedDeclaration, Span::new(0, 9))
        .message("interface")
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 0);
    assert_eq!(
        diagnostics.iter().next().unwrap().text(),
        "cannot extract a type from interface declarations"
    );
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingTypeAnnotation, Span::new(4, 5))
        .message("x")
        .emit();

    let plain = diagnostics.printer().render();
    assert_eq!(
        plain,
        "warning at 4..5: missing type annotation for `x` \
         (hint: annotate the declaration or initialize it with a `new` expression)"
    );
}

#[test]
fn extra_hints_follow_the_default() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ObjectLiteralNotSupported, Span::new(10, 12))
        .hint("seen while typing `config`")
        .emit();

    let plain = diagnostics.printer().render();
    assert!(plain.contains("(hint: declare a class and construct it with `new`"));
    assert!(plain.contains("(hint: seen while typing `config`)"));
}

#[test]
fn plain_format_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedTypeName, Span::new(4, 11))
        .message("Missing")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnsupportedDeclaration, Span::new(20, 29))
        .emit();

    let plain = diagnostics.printer().render();
    let lines: Vec<&str> = plain.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "warning at 4..11: cannot resolve type name `Missing`");
    assert_eq!(
        lines[1],
        "error at 20..29: declaration kind is not supported by type extraction"
    );
}

#[test]
fn renders_annotated_snippet() {
    let source = "let a: Missing = 1;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedTypeName, Span::new(7, 14))
        .message("Missing")
        .emit();

    let rendered = diagnostics
        .printer()
        .source(source)
        .path("unit.ing")
        .render();

    assert!(rendered.contains("warning: cannot resolve type name `Missing`"));
    assert!(rendered.contains("unit.ing"));
    assert!(rendered.contains("let a: Missing = 1;"));
    assert!(rendered.contains("^^^^^^^"));
}

#[test]
fn related_spans_share_the_snippet() {
    let source = "class A {}\nlet b: A = new B();";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedTypeName, Span::new(26, 27))
        .message("B")
        .related_to("annotation names a different type", Span::new(18, 19))
        .emit();

    let rendered = diagnostics.printer().source(source).render();
    assert!(rendered.contains("cannot resolve type name `B`"));
    assert!(rendered.contains("annotation names a different type"));
}

#[test]
fn zero_width_span_still_points_at_a_column() {
    let source = "let x = 1;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingTypeAnnotation, Span::new(5, 5))
        .message("x")
        .emit();

    let rendered = diagnostics.printer().source(source).render();
    assert!(rendered.contains('^'));
}

#[test]
fn empty_collection_renders_nothing() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());
    assert_eq!(diagnostics.printer().render(), "");
    assert_eq!(diagnostics.printer().source("let x = 1;").render(), "");
}

#[test]
fn extend_appends_in_order() {
    let mut first = Diagnostics::new();
    first
        .report(DiagnosticKind::MissingTypeAnnotation, Span::new(0, 1))
        .emit();

    let mut second = Diagnostics::new();
    second
        .report(DiagnosticKind::UnsupportedDeclaration, Span::new(2, 3))
        .emit();

    first.extend(second);
    assert_eq!(first.len(), 2);
    assert_eq!(first.warning_count(), 1);
    assert_eq!(first.error_count(), 1);
    let kinds: Vec<DiagnosticKind> = first.iter().map(DiagnosticMessage::kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::MissingTypeAnnotation,
            DiagnosticKind::UnsupportedDeclaration
        ]
    );
}
