#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::str::Str;
use crate::value::Value;
use crate::{Array, Datetime, Error, ErrorKind};
use std::fmt;

/// Tables with at least this many entries keep a hash index of their keys.
pub(crate) const INDEXED_TABLE_THRESHOLD: usize = 6;

type TableEntry = (Str, Value);

/// A TOML table: key-value pairs in insertion order with unique keys.
///
/// Small tables are searched linearly. Once a table reaches six entries it
/// maintains a `foldhash` index from key to position, which never affects
/// iteration order.
#[derive(Clone, Default)]
pub struct Table {
    entries: Vec<TableEntry>,
    index: Option<foldhash::HashMap<Str, usize>>,
}

impl Table {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }

    /// Inserts a key-value pair.
    ///
    /// An existing key keeps its position and has its value replaced; the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<Str>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some(idx) = self.find_index(&key) {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }
        self.push_unchecked(key, value);
        None
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns both the stored key and the value for `key`.
    pub fn get_key_value<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<(&Str, &Value)> {
        let idx = self.find_index(key.as_ref())?;
        let (k, v) = &self.entries[idx];
        Some((k, v))
    }

    /// Returns a reference to the value for `key`.
    pub fn get<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&Value> {
        let idx = self.find_index(key.as_ref())?;
        Some(&self.entries[idx].1)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> Option<&mut Value> {
        let idx = self.find_index(key.as_ref())?;
        Some(&mut self.entries[idx].1)
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        self.find_index(key.as_ref()).is_some()
    }

    /// Returns the table stored under `key`, if any.
    pub fn get_table<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&Table> {
        self.get(key)?.as_table()
    }

    /// Returns the array stored under `key`, if any.
    pub fn get_array<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&Array> {
        self.get(key)?.as_array()
    }

    /// Returns the UTF-8 string stored under `key`, if any.
    pub fn get_str<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_integer<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<i64> {
        self.get(key)?.as_integer()
    }

    pub fn get_float<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<f64> {
        self.get(key)?.as_float()
    }

    pub fn get_bool<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    pub fn get_datetime<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&Datetime> {
        self.get(key)?.as_datetime()
    }

    /// Returns the value for `key`, or a missing-field error.
    pub fn required(&self, key: &str) -> Result<&Value, Error> {
        match self.get(key) {
            Some(value) => Ok(value),
            None => Err(Error::from(ErrorKind::MissingField(key.to_owned()))),
        }
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over entries in insertion order with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Str> + ExactSizeIterator {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    pub(crate) fn find_index(&self, key: &[u8]) -> Option<usize> {
        if let Some(index) = &self.index {
            return index.get(key).copied();
        }
        self.entries.iter().position(|(k, _)| k.as_bytes() == key)
    }

    #[inline]
    pub(crate) fn value_at_mut(&mut self, idx: usize) -> &mut Value {
        &mut self.entries[idx].1
    }

    /// Appends an entry whose key is known to be absent.
    pub(crate) fn push_unchecked(&mut self, key: Str, value: Value) -> usize {
        let idx = self.entries.len();
        match &mut self.index {
            Some(index) => {
                index.insert(key.clone(), idx);
            }
            None if idx + 1 >= INDEXED_TABLE_THRESHOLD => {
                let mut index = foldhash::HashMap::with_capacity_and_hasher(
                    INDEXED_TABLE_THRESHOLD * 2,
                    Default::default(),
                );
                for (i, (k, _)) in self.entries.iter().enumerate() {
                    index.insert(k.clone(), i);
                }
                index.insert(key.clone(), idx);
                self.index = Some(index);
            }
            None => {}
        }
        self.entries.push((key, value));
        idx
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl std::ops::Index<&str> for Table {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key `{key}` not found in table"),
        }
    }
}

impl<K: Into<Str>> FromIterator<(K, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// Borrowing iterator over the entries of a [`Table`].
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, TableEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.inner.next()?;
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (k, v) = self.inner.next_back()?;
        Some((k, v))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterator over the entries of a [`Table`] with mutable values.
pub struct IterMut<'a> {
    inner: std::slice::IterMut<'a, TableEntry>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a Str, &'a mut Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.inner.next()?;
        Some((&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IterMut<'_> {}

/// Owning iterator over the entries of a [`Table`].
pub struct IntoIter {
    inner: std::vec::IntoIter<TableEntry>,
}

impl Iterator for IntoIter {
    type Item = (Str, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Table {
    type Item = (Str, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a Str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Table {
    type Item = (&'a Str, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = ser.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
