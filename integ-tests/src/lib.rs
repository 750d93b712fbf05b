#![allow(missing_docs)]

use codespan_reporting::diagnostic::Diagnostic;

/// Loads `data/<name>.toml`, parses it and asserts its JSON form matches
/// `data/<name>.json`
#[macro_export]
macro_rules! valid {
    ($name:ident) => {
        #[test]
        fn $name() {
            let toml_str = $crate::load(concat!(stringify!($name), ".toml"));
            let expected = $crate::load(concat!(stringify!($name), ".json"));
            let table = match toml_tree::parse(&toml_str) {
                Ok(table) => table,
                Err(err) => {
                    let file = $crate::File::new(stringify!($name), &toml_str);
                    let error = $crate::emit_diags(&file, Some(err.to_diagnostic(())));
                    panic!("failed to parse toml:\n{error}");
                }
            };
            let expected: serde_json::Value =
                serde_json::from_str(&expected).expect("invalid expected json");
            pretty_assertions::assert_eq!($crate::to_json(&table), expected);
        }
    };
}

/// Parses an invalid document and asserts the rendered error message against
/// an inline snapshot
#[macro_export]
macro_rules! invalid {
    ($name:ident, $toml:expr, @$message:literal) => {
        #[test]
        fn $name() {
            let error = match toml_tree::parse($toml) {
                Ok(table) => panic!("expected an error, parsed {table:?}"),
                Err(error) => error,
            };
            insta::assert_snapshot!(error.to_string(), @$message);

            let file = $crate::File::new(stringify!($name), $toml);
            let rendered = $crate::emit_diags(&file, Some(error.to_diagnostic(())));
            let code = format!("error[{}]", error.kind);
            assert!(rendered.contains(&code), "{rendered}");
        }
    };
}

pub type File<'s> = codespan_reporting::files::SimpleFile<&'static str, &'s str>;

pub fn emit_diags(f: &File<'_>, error: impl IntoIterator<Item = Diagnostic<()>>) -> String {
    let mut output = codespan_reporting::term::termcolor::NoColor::new(Vec::new());

    for diag in error {
        codespan_reporting::term::emit_to_write_style(
            &mut output,
            &codespan_reporting::term::Config::default(),
            f,
            &diag,
        )
        .expect("failed to emit diagnostic");
    }

    String::from_utf8(output.into_inner()).expect("diagnostic output is not utf-8")
}

/// Reads a file from the `data` directory
pub fn load(name: &str) -> String {
    let path = format!("{}/data/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to load {path}: {e}"))
}

pub fn to_json(table: &toml_tree::Table) -> serde_json::Value {
    serde_json::to_value(table).expect("table is not representable as json")
}
