//! Resolution of header and dotted-key paths against the document tree.

#[cfg(test)]
#[path = "./path_tests.rs"]
mod tests;

use crate::str::Str;
use crate::{Array, ErrorKind, Table, Value};

fn not_a_table(key: &Str) -> ErrorKind {
    ErrorKind::NotATable(key.to_str_lossy().into_owned())
}

/// Returns the entry index of `key`, inserting `make()` when absent.
fn find_or_insert(table: &mut Table, key: &Str, make: fn() -> Value) -> usize {
    match table.find_index(key) {
        Some(idx) => idx,
        None => table.push_unchecked(key.clone(), make()),
    }
}

fn empty_table() -> Value {
    Value::Table(Table::new())
}

fn empty_array() -> Value {
    Value::Array(Array::new())
}

/// One step of a header path: tables are entered, arrays are entered through
/// their last element, which must itself be a table.
fn descend<'t>(table: &'t mut Table, key: &Str) -> Result<&'t mut Table, ErrorKind> {
    let idx = find_or_insert(table, key, empty_table);
    match table.value_at_mut(idx) {
        Value::Table(inner) => Ok(inner),
        Value::Array(array) => match array.last_mut() {
            Some(Value::Table(inner)) => Ok(inner),
            _ => Err(not_a_table(key)),
        },
        _ => Err(not_a_table(key)),
    }
}

/// One step of a dotted key: only tables are entered.
fn descend_dotted<'t>(table: &'t mut Table, key: &Str) -> Result<&'t mut Table, ErrorKind> {
    let idx = find_or_insert(table, key, empty_table);
    match table.value_at_mut(idx) {
        Value::Table(inner) => Ok(inner),
        _ => Err(not_a_table(key)),
    }
}

/// Resolves a `[a.b.c]` header, creating missing tables along the way.
pub(crate) fn resolve_table<'t>(root: &'t mut Table, path: &[Str]) -> Result<&'t mut Table, ErrorKind> {
    if path.is_empty() {
        return Err(ErrorKind::EmptyTableName);
    }
    let mut current = root;
    for key in path {
        current = descend(current, key)?;
    }
    Ok(current)
}

/// Resolves a `[[a.b.c]]` header: the final key names an array that gets a
/// fresh table appended, which is returned.
pub(crate) fn resolve_array_table<'t>(
    root: &'t mut Table,
    path: &[Str],
) -> Result<&'t mut Table, ErrorKind> {
    let Some((last, parents)) = path.split_last() else {
        return Err(ErrorKind::EmptyTableName);
    };
    let mut current = root;
    for key in parents {
        current = descend(current, key)?;
    }
    let idx = find_or_insert(current, last, empty_array);
    match current.value_at_mut(idx) {
        Value::Array(array) => Ok(array.push_table()),
        _ => Err(ErrorKind::NotAnArray(last.to_str_lossy().into_owned())),
    }
}

/// Inserts `value` under a possibly dotted key, replacing any previous value
/// stored under the final segment.
pub(crate) fn insert_dotted(table: &mut Table, mut keys: Vec<Str>, value: Value) -> Result<(), ErrorKind> {
    let Some(last) = keys.pop() else {
        return Err(ErrorKind::Wanted {
            expected: "a key",
            found: "nothing",
        });
    };
    let mut current = table;
    for key in &keys {
        current = descend_dotted(current, key)?;
    }
    current.insert(last, value);
    Ok(())
}
