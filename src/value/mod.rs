//! # Value Model
//!
//! The dynamic values that flow between handler lifecycle stages.
//!
//! A stage receives an argument collection and returns one for the next
//! stage, so the model needs scalars, an ordered keyed collection
//! ([`Array`]) that can represent both positional and named argument lists,
//! and opaque shared instances ([`Object`]) for messages, handlers and the
//! dispatcher handle.
//!
//! JSON converts losslessly into a [`Value`] (arrays become lists, objects
//! become name-keyed arrays), which keeps handler bodies short:
//!
//! ```rust
//! use pathway_core::value::Value;
//! use serde_json::json;
//!
//! let args = Value::from(json!({"a": "b", "c": "d"}));
//! assert!(args.as_array().is_some_and(|array| array.is_named()));
//! ```

mod array;
mod object;

pub use array::{Array, Key};
pub use object::Object;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A dynamically typed value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    /// A positional list
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Array::list(values))
    }

    /// A name-keyed map
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Array(
            entries
                .into_iter()
                .map(|(key, value)| (Key::Name(key.into()), value.into()))
                .collect(),
        )
    }

    pub fn object<T: std::any::Any + Send + Sync>(value: T) -> Self {
        Value::Object(Object::new(value))
    }

    /// Short type description used in error messages
    pub fn type_label(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Array(_) => "array".to_string(),
            Value::Object(object) => format!("object({})", object.type_name()),
        }
    }

    /// Like [`type_label`](Self::type_label), but spells out the keys of an array
    pub fn shape_label(&self) -> String {
        match self {
            Value::Array(array) => {
                let keys: Vec<String> = array.keys().map(ToString::to_string).collect();
                format!("array with keys [{}]", keys.join(", "))
            }
            other => other.type_label(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Look up `key` when this value is an array
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.as_array().and_then(|array| array.get(&key.into()))
    }

    /// Take the object out, or hand the value back when it is not one
    pub fn into_object(self) -> std::result::Result<Object, Value> {
        match self {
            Value::Object(object) => Ok(object),
            other => Err(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::list(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(fields) => Value::map(fields),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(array) if array.is_list() => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for value in array.values() {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Value::Array(array) => {
                let mut map = serializer.serialize_map(Some(array.len()))?;
                for (key, value) in array.iter() {
                    match key {
                        Key::Index(index) => map.serialize_entry(&index.to_string(), value)?,
                        Key::Name(name) => map.serialize_entry(name, value)?,
                    }
                }
                map.end()
            }
            Value::Object(_) => serializer.serialize_str(&self.type_label()),
        }
    }
}
