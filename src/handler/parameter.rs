//! Declared parameters of a handler method.

use crate::value::Value;

/// One declared parameter of a handler method.
///
/// Built once when the method is declared and copied into every
/// [`MethodBinding`](super::MethodBinding) of that method; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    is_variadic: bool,
    default: Option<Value>,
}

impl ParameterSpec {
    /// A required parameter
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_variadic: false,
            default: None,
        }
    }

    /// A parameter that falls back to `default` when no argument is supplied
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            is_variadic: false,
            default: Some(default.into()),
        }
    }

    /// The trailing parameter that collects every remaining positional argument
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_variadic: true,
            default: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}
