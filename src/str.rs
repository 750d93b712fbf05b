//! An owned, growable byte string used for keys and string values.

use std::borrow::{Borrow, Cow};
use std::collections::TryReserveError;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::{fmt, str};

/// Smallest capacity allocated for a non-empty string.
const MIN_CAP: usize = 8;

/// An owned byte string holding a TOML key or string value.
///
/// Content is UTF-8 for anything written literally in the source, but `\U`
/// escapes above U+10FFFF are stored in their extended 5 and 6 byte forms,
/// so the raw bytes are the source of truth. Use [`as_str`](Self::as_str)
/// for a checked `&str` view.
///
/// Capacity grows to the next power of two (at least 8 bytes) so repeated
/// single-byte appends while scanning stay amortized.
#[derive(Clone, Default)]
pub struct Str {
    bytes: Vec<u8>,
}

impl Str {
    /// Creates an empty string without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty string with room for at least `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut s = Self::new();
        if capacity > 0 {
            s.reserve(capacity);
        }
        s
    }

    /// Number of bytes in the string.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the string holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes the string can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the content as `&str` if it is valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.bytes).ok()
    }

    /// Returns the content as text, replacing invalid sequences with U+FFFD.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Consumes the string, returning the underlying bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.reserve(1);
        self.bytes.push(byte);
    }

    /// Appends a string slice.
    pub fn push_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }

    /// Appends raw bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.bytes.extend_from_slice(bytes);
    }

    /// Removes all bytes, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Ensures room for `additional` more bytes using the power-of-two
    /// growth policy, reporting allocation failure instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let Some(required) = self.bytes.len().checked_add(additional) else {
            // Let `Vec` produce the capacity-overflow error.
            return self.bytes.try_reserve(additional);
        };
        if required <= self.bytes.capacity() {
            return Ok(());
        }
        let target = grown_capacity(required);
        self.bytes.try_reserve_exact(target - self.bytes.len())
    }

    /// Fallible [`push`](Self::push).
    #[inline]
    pub(crate) fn try_push(&mut self, byte: u8) -> Result<(), TryReserveError> {
        self.try_reserve(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    /// Fallible [`extend_from_slice`](Self::extend_from_slice).
    pub(crate) fn try_extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), TryReserveError> {
        self.try_reserve(bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    fn reserve(&mut self, additional: usize) {
        if self.try_reserve(additional).is_err() {
            // Falls back to the standard growth path, which reports the
            // failure through the global allocation error handler.
            self.bytes.reserve(additional);
        }
    }
}

#[inline]
fn grown_capacity(required: usize) -> usize {
    required
        .max(MIN_CAP)
        .checked_next_power_of_two()
        .unwrap_or(required)
}

impl Deref for Str {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for Str {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Borrow<[u8]> for Str {
    #[inline]
    fn borrow(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.write_str(s),
            None => f.write_str(&self.to_str_lossy()),
        }
    }
}

impl fmt::Debug for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => write!(f, "b\"{}\"", self.bytes.escape_ascii()),
        }
    }
}

impl PartialEq for Str {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Str {}

impl PartialOrd for Str {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Str {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl PartialEq<str> for Str {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Str {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Str {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl Hash for Str {
    // Must agree with `[u8]` so lookups through `Borrow<[u8]>` work.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes[..].hash(state);
    }
}

impl From<&str> for Str {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl From<&[u8]> for Str {
    fn from(bytes: &[u8]) -> Self {
        let mut s = Self::new();
        s.extend_from_slice(bytes);
        s
    }
}

impl From<String> for Str {
    #[inline]
    fn from(s: String) -> Self {
        Self {
            bytes: s.into_bytes(),
        }
    }
}

impl From<Vec<u8>> for Str {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<Str> for Vec<u8> {
    #[inline]
    fn from(s: Str) -> Self {
        s.bytes
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Str {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.as_str() {
            Some(s) => ser.serialize_str(s),
            None => ser.serialize_bytes(&self.bytes),
        }
    }
}

#[cfg(test)]
#[path = "./str_tests.rs"]
mod tests;
