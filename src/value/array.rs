//! Ordered keyed collection used for argument lists.
//!
//! An [`Array`] keeps its entries in insertion order and accepts both integer
//! and string keys. That is what lets a single type carry positional
//! arguments (`0..n-1`), named arguments (all string keys), and the malformed
//! shapes in between which the binder must reject.

use std::fmt;

use super::Value;

/// Key of an [`Array`] entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(i64::from(index))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

/// Insertion-ordered map from [`Key`] to [`Value`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    entries: Vec<(Key, Value)>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list: values keyed `0..n-1` in order
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let entries = values
            .into_iter()
            .zip(0_i64..)
            .map(|(value, index)| (Key::Index(index), value.into()))
            .collect();
        Self { entries }
    }

    /// Insert or replace the value under `key`. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Append under the next free integer key (one past the largest so far)
    pub fn push(&mut self, value: impl Into<Value>) {
        let next = self
            .entries
            .iter()
            .filter_map(|(key, _)| key.as_index())
            .max()
            .map_or(0, |max| max + 1);
        self.entries.push((Key::Index(next), value.into()));
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// True when the keys are exactly `0..n-1` in insertion order. The empty array is a list.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .zip(0_i64..)
            .all(|((key, _), expected)| *key == Key::Index(expected))
    }

    /// True when every key is a string
    pub fn is_named(&self) -> bool {
        self.entries
            .iter()
            .all(|(key, _)| matches!(key, Key::Name(_)))
    }

    pub fn into_entries(self) -> Vec<(Key, Value)> {
        self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for Array
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut array = Array::new();
        for (key, value) in iter {
            array.insert(key, value);
        }
        array
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
