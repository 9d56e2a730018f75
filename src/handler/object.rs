//! # Handler Objects
//!
//! Rust has no runtime reflection, so a handler declares its methods up front:
//! each method carries its name, visibility, receiver kind, ordered
//! parameters and a body. The binder reads these declarations exactly the
//! way it would read a reflected signature, which keeps name-based lookup
//! (and its `MethodNotFound`/`MethodNotCallable` failures) intact: any object
//! declaring `prepare`, `process` and `finalize` qualifies as a handler.
//!
//! ```rust
//! use pathway_core::handler::{HandlerBuilder, Method};
//! use pathway_core::value::Value;
//!
//! # fn main() -> pathway_core::Result<()> {
//! let handler = HandlerBuilder::new("GreetHandler")
//!     .method(Method::new("prepare").param("message").param("dispatcher").body(|_| {
//!         Ok(Value::map([("name", "world")]))
//!     }))
//!     .method(Method::new("process").param("name").body(|args| {
//!         let name = args[0].as_str().unwrap_or_default().to_string();
//!         Ok(Value::list([format!("hello {name}")]))
//!     }))
//!     .method(Method::new("finalize").param("greeting").body(|mut args| Ok(args.remove(0))))
//!     .build()?;
//!
//! assert!(handler.method("process").is_some());
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::parameter::ParameterSpec;
use crate::error::{DispatchError, Result};
use crate::value::{Object, Value};

/// Body of a handler method. Receives the resolved arguments in declaration
/// order, with the variadic slot spread in place.
pub type MethodBody = Arc<dyn Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Instance,
    Static,
}

/// A declared method: signature plus body
#[derive(Clone)]
pub struct MethodDef {
    name: String,
    visibility: Visibility,
    receiver: Receiver,
    parameters: Vec<ParameterSpec>,
    body: MethodBody,
}

impl MethodDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub(crate) fn body(&self) -> &MethodBody {
        &self.body
    }

    /// Public instance methods are the only ones the dispatcher may call
    pub fn is_callable(&self) -> bool {
        self.visibility == Visibility::Public && self.receiver == Receiver::Instance
    }

    fn validate(&self, handler: &str) -> Result<()> {
        let mut seen = HashSet::new();

        for (position, parameter) in self.parameters.iter().enumerate() {
            if !seen.insert(parameter.name()) {
                return Err(DispatchError::invalid_signature(
                    handler,
                    &self.name,
                    format!("duplicate parameter ${}", parameter.name()),
                ));
            }

            if parameter.is_variadic() && position + 1 != self.parameters.len() {
                return Err(DispatchError::invalid_signature(
                    handler,
                    &self.name,
                    format!("variadic parameter ${} must be the last one", parameter.name()),
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("receiver", &self.receiver)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`MethodDef`]. Methods default to public instance methods.
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    visibility: Visibility,
    receiver: Receiver,
    parameters: Vec<ParameterSpec>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            receiver: Receiver::Instance,
            parameters: Vec::new(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.receiver = Receiver::Static;
        self
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSpec::required(name));
        self
    }

    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.parameters.push(ParameterSpec::optional(name, default));
        self
    }

    pub fn variadic(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSpec::variadic(name));
        self
    }

    pub fn body<F>(self, body: F) -> MethodDef
    where
        F: Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        MethodDef {
            name: self.name,
            visibility: self.visibility,
            receiver: self.receiver,
            parameters: self.parameters,
            body: Arc::new(body),
        }
    }
}

/// An object whose methods are declared rather than reflected
#[derive(Debug)]
pub struct HandlerObject {
    name: String,
    methods: HashMap<String, MethodDef>,
}

impl HandlerObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.get(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

/// Builder for a [`HandlerObject`]
#[derive(Debug)]
pub struct HandlerBuilder {
    name: String,
    methods: Vec<MethodDef>,
}

impl HandlerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Validate every declared signature and build the handler
    pub fn build(self) -> Result<HandlerObject> {
        let mut methods = HashMap::with_capacity(self.methods.len());

        for method in self.methods {
            method.validate(&self.name)?;

            if methods.contains_key(method.name()) {
                return Err(DispatchError::invalid_signature(
                    &self.name,
                    method.name(),
                    "method declared more than once",
                ));
            }
            methods.insert(method.name().to_string(), method);
        }

        Ok(HandlerObject {
            name: self.name,
            methods,
        })
    }

    /// Build the handler and wrap it as an object value, ready for a resolver
    pub fn into_value(self) -> Result<Value> {
        Ok(Value::Object(Object::new(self.build()?)))
    }
}
