//! Argument-collection shapes.
//!
//! A lifecycle stage is called with either a positional list or a name-keyed
//! map. The shape is decided once, up front, before any parameter is
//! resolved; everything else is rejected.

use crate::value::{Key, Value};

/// A well-formed argument collection
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// Keys were exactly `0..n-1`, in order
    Positional(Vec<Value>),
    /// Every key was a string; insertion order kept
    Named(Vec<(String, Value)>),
}

impl Arguments {
    /// Classify `value`. Hands the value back untouched when it is neither
    /// a list nor a name-keyed map, so the caller can report what it got.
    pub fn detect(value: Value) -> std::result::Result<Self, Value> {
        let array = match value {
            Value::Array(array) => array,
            other => return Err(other),
        };

        if array.is_list() {
            return Ok(Arguments::Positional(
                array.into_iter().map(|(_, value)| value).collect(),
            ));
        }

        if array.is_named() {
            return Ok(Arguments::Named(
                array
                    .into_iter()
                    .filter_map(|(key, value)| match key {
                        Key::Name(name) => Some((name, value)),
                        Key::Index(_) => None,
                    })
                    .collect(),
            ));
        }

        Err(Value::Array(array))
    }

    pub fn len(&self) -> usize {
        match self {
            Arguments::Positional(values) => values.len(),
            Arguments::Named(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Arguments::Positional(_) => "positional",
            Arguments::Named(_) => "named",
        }
    }
}
