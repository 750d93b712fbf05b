use codespan_reporting::diagnostic::{LabelStyle, Severity};
use integ_tests::{File, emit_diags};

fn render(name: &'static str, toml: &str) -> (toml_tree::Error, String) {
    let error = toml_tree::parse(toml).unwrap_err();
    let file = File::new(name, toml);
    let rendered = emit_diags(&file, Some(error.to_diagnostic(())));
    (error, rendered)
}

#[test]
fn diagnostic_carries_code_and_span() {
    let toml = "a = 1\nb = \"open";
    let error = toml_tree::parse(toml).unwrap_err();
    let diag = error.to_diagnostic(());

    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.code.as_deref(), Some("unterminated-string"));
    assert_eq!(diag.labels.len(), 1);
    let label = &diag.labels[0];
    assert_eq!(label.style, LabelStyle::Primary);
    assert_eq!(label.range, toml.len()..toml.len());
    assert_eq!(label.message, "string terminator not found on this line");
}

#[test]
fn diagnostic_renders_source_line() {
    let (error, rendered) = render("config.toml", "name = 'ok'\nport = 80x\n");
    assert_eq!(error.line_info, Some((2, 8)));
    assert_eq!(&"name = 'ok'\nport = 80x\n"[error.span.start..error.span.end], "80x");
    assert!(rendered.contains("error[invalid-number]"), "{rendered}");
    assert!(rendered.contains("config.toml:2:8"), "{rendered}");
    assert!(rendered.contains("port = 80x"), "{rendered}");
    assert!(rendered.contains("unable to parse number"), "{rendered}");
}

#[test]
fn structural_errors_name_the_key() {
    let (error, rendered) = render("tree.toml", "a = 1\n[[a]]\n");
    assert_eq!(error.span.start, 6);
    assert_eq!(error.span.end, 11);
    assert!(rendered.contains("error[not-an-array]"), "{rendered}");
    assert!(rendered.contains("this key was not an array: `a`"), "{rendered}");
    assert!(rendered.contains("array of tables header"), "{rendered}");

    let (_, rendered) = render("tree.toml", "a = 1\n[a.b]\n");
    assert!(rendered.contains("key `a` is not a table"), "{rendered}");
    assert!(rendered.contains("attempted to descend here"), "{rendered}");
}

#[test]
fn wanted_errors_span_the_found_token() {
    let toml = "key value";
    let error = toml_tree::parse(toml).unwrap_err();
    assert_eq!(&toml[error.span.start..error.span.end], "value");

    let diag = error.to_diagnostic(());
    assert_eq!(diag.labels[0].message, "expected an equals");
}

#[test]
fn typed_access_errors_render() {
    let table = toml_tree::parse("port = 'eighty'").unwrap();
    let error = table.required("port").unwrap().expect_integer().unwrap_err();
    let diag = error.to_diagnostic(());
    assert_eq!(diag.code.as_deref(), Some("wrong-type"));
    assert_eq!(diag.message, "expected integer, found string");

    let error = table.required("host").unwrap_err();
    assert_eq!(error.to_diagnostic(()).message, "missing field 'host'");
}
