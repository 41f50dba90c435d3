//! Tagged metadata values and the flat ordered mapping holding them.

use std::fmt;

/// A single metadata value.
///
/// The block grammar only produces three shapes: plain strings, booleans,
/// and flat arrays of strings. Anything ambiguous degrades to `Str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Str(String),
    Bool(bool),
    List(Vec<String>),
}

impl MetaValue {
    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as a string array, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// String form used when a record field needs a string regardless of the
/// declared value shape (e.g. `date = true` still serializes as `"true"`).
impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Flat mapping from key to [`MetaValue`], preserving insertion order.
///
/// Section headers in the block are skipped during parsing, so all keys land
/// here regardless of grouping. Re-assigning a key overwrites its value but
/// keeps its original position, and lookups are linear: metadata blocks hold
/// a handful of entries, not thousands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaMap {
    entries: Vec<(String, MetaValue)>,
}

impl MetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, replacing the value of an existing one in place.
    pub fn insert(&mut self, key: &str, value: MetaValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
