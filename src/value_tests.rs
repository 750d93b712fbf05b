use super::*;
use crate::ErrorCode;

fn sample() -> Vec<Value> {
    vec![
        Value::Table(Table::new()),
        Value::Array(Array::new()),
        Value::String("s".into()),
        Value::Integer(1),
        Value::Float(0.5),
        Value::Datetime("07:32:00".parse().unwrap()),
        Value::Boolean(true),
    ]
}

#[test]
fn type_names() {
    let names: Vec<&str> = sample().iter().map(Value::type_str).collect();
    assert_eq!(
        names,
        ["table", "array", "string", "integer", "float", "datetime", "boolean"]
    );
}

#[test]
fn exactly_one_predicate_holds() {
    for v in sample() {
        let hits = [
            v.is_table(),
            v.is_array(),
            v.is_str(),
            v.is_integer(),
            v.is_float(),
            v.is_datetime(),
            v.is_bool(),
        ]
        .iter()
        .filter(|b| **b)
        .count();
        assert_eq!(hits, 1, "{v:?}");
    }
}

#[test]
fn accessors_are_exact() {
    let int = Value::Integer(3);
    assert_eq!(int.as_integer(), Some(3));
    assert_eq!(int.as_float(), None);
    assert_eq!(int.as_str(), None);
    assert!(int.as_table().is_none());

    let float = Value::Float(2.5);
    assert_eq!(float.as_float(), Some(2.5));
    assert_eq!(float.as_integer(), None);

    let s = Value::from("text");
    assert_eq!(s.as_str(), Some("text"));
    assert_eq!(s.as_bytes(), Some(&b"text"[..]));
}

#[test]
fn non_utf8_string() {
    let v = Value::String(Str::from(vec![0xFCu8, 0x84, 0x80, 0x80, 0x80, 0x80]));
    assert_eq!(v.as_str(), None);
    assert_eq!(v.as_bytes().map(<[u8]>::len), Some(6));
    let err = v.expect_str().unwrap_err();
    assert_eq!(err.to_string(), "expected string, found bytes");
}

#[test]
fn mutable_accessors() {
    let mut v = Value::Integer(1);
    *v.as_integer_mut().unwrap() = 9;
    assert_eq!(v, Value::Integer(9));
    assert!(v.as_float_mut().is_none());

    let mut v = Value::Table(Table::new());
    v.as_table_mut().unwrap().insert("k", Value::Boolean(false));
    assert!(v.has_key("k"));
    assert!(!v.has_key("j"));

    let mut v = Value::Array(Array::new());
    v.as_array_mut().unwrap().push(Value::Integer(1));
    assert_eq!(v.as_array().map(Array::len), Some(1));

    let mut v = Value::from("a");
    v.as_str_mut().unwrap().push_str("bc");
    assert_eq!(v.as_str(), Some("abc"));

    let mut v = Value::Boolean(false);
    *v.as_bool_mut().unwrap() = true;
    assert_eq!(v.as_bool(), Some(true));
}

#[test]
fn expect_reports_both_types() {
    let v = Value::String("x".into());
    let err = v.expect_integer().unwrap_err();
    assert_eq!(err.code(), ErrorCode::Generic);
    assert!(matches!(
        err.kind,
        ErrorKind::WrongType {
            expected: "integer",
            found: "string"
        }
    ));
    assert_eq!(err.to_string(), "expected integer, found string");

    assert!(Value::Integer(1).expect_table().is_err());
    assert!(Value::Integer(1).expect_array().is_err());
    assert!(Value::Integer(1).expect_bool().is_err());
    assert!(Value::Integer(1).expect_datetime().is_err());
    assert_eq!(Value::Float(1.0).expect_float().unwrap(), 1.0);
    assert_eq!(v.expect_str().unwrap(), "x");
}

#[test]
fn dropping_nested_values() {
    let mut root = Table::new();
    let mut level = Table::new();
    for i in 0..50 {
        let mut next = Table::new();
        next.insert("depth", Value::Integer(i));
        next.insert("child", Value::Table(level));
        level = next;
    }
    root.insert("tree", Value::Table(level));
    let copy = root.clone();
    assert_eq!(copy, root);
    drop(root);
    assert!(copy.get_table("tree").is_some());
}
