//! # Method Binding
//!
//! Binds one named method of one handler object and resolves argument
//! collections against its declared parameters on every call.
//!
//! The method is looked up and its signature captured exactly once, when the
//! binding is created; `invoke` only walks the captured parameter list.
//!
//! ## Resolution
//!
//! Positional lists are consumed left to right with a cursor. A variadic
//! parameter swallows whatever is left; a missing value falls back to the
//! parameter default; anything left over is an error.
//!
//! Named maps are matched by parameter name, falling back to defaults; keys
//! that match no parameter are an error. In named mode a variadic parameter
//! takes the single value supplied under its own name.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::arguments::Arguments;
use super::object::{HandlerObject, MethodBody};
use super::parameter::ParameterSpec;
use crate::error::{DispatchError, Result};
use crate::value::{Object, Value};

/// A handler method, located and introspected once, ready to be invoked many times
#[derive(Clone)]
pub struct MethodBinding {
    owner: Arc<HandlerObject>,
    method_name: String,
    parameters: Vec<ParameterSpec>,
    body: MethodBody,
}

impl MethodBinding {
    /// Locate `method_name` on `handler` and capture its signature.
    ///
    /// Fails with `MethodNotFound` when the object declares no such method
    /// (objects that are not handler objects declare none), and with
    /// `MethodNotCallable` when the method is not a public instance method.
    pub fn bind(handler: &Object, method_name: &str) -> Result<Self> {
        let owner = handler
            .downcast::<HandlerObject>()
            .ok_or_else(|| DispatchError::method_not_found(handler.type_name(), method_name))?;

        let method = owner
            .method(method_name)
            .ok_or_else(|| DispatchError::method_not_found(owner.name(), method_name))?;

        if !method.is_callable() {
            return Err(DispatchError::method_not_callable(owner.name(), method_name));
        }

        let parameters = method.parameters().to_vec();
        let body = Arc::clone(method.body());

        debug!(
            handler = owner.name(),
            method = method_name,
            parameters = parameters.len(),
            "Bound handler method"
        );

        Ok(Self {
            owner,
            method_name: method_name.to_string(),
            parameters,
            body,
        })
    }

    pub fn handler_name(&self) -> &str {
        self.owner.name()
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn handler(&self) -> &Arc<HandlerObject> {
        &self.owner
    }

    /// Resolve `arguments` against the captured signature and call the method.
    ///
    /// Whatever the method body returns, or fails with, is passed back as is.
    pub fn invoke(&self, arguments: Value) -> Result<Value> {
        let arguments = Arguments::detect(arguments).map_err(|rejected| {
            DispatchError::invalid_argument_shape(self.handler_name(), &self.method_name, &rejected)
        })?;

        trace!(
            handler = self.handler_name(),
            method = %self.method_name,
            mode = arguments.mode(),
            supplied = arguments.len(),
            "Resolving arguments"
        );

        let resolved = match arguments {
            Arguments::Positional(values) => self.resolve_positional(values)?,
            Arguments::Named(entries) => self.resolve_named(entries)?,
        };

        (self.body)(resolved).map_err(DispatchError::from)
    }

    fn resolve_positional(&self, supplied: Vec<Value>) -> Result<Vec<Value>> {
        let mut resolved = Vec::with_capacity(self.parameters.len().max(supplied.len()));
        let mut remaining = supplied.into_iter();

        for parameter in &self.parameters {
            if parameter.is_variadic() {
                resolved.extend(remaining.by_ref());
                break;
            }

            if let Some(value) = remaining.next() {
                resolved.push(value);
            } else if let Some(default) = parameter.default_value() {
                resolved.push(default.clone());
            } else {
                return Err(self.missing(parameter));
            }
        }

        if remaining.next().is_some() {
            return Err(self.too_many());
        }

        Ok(resolved)
    }

    fn resolve_named(&self, mut supplied: Vec<(String, Value)>) -> Result<Vec<Value>> {
        let mut resolved = Vec::with_capacity(self.parameters.len());

        for parameter in &self.parameters {
            let position = supplied
                .iter()
                .position(|(name, _)| name == parameter.name());

            if let Some(position) = position {
                let (_, value) = supplied.swap_remove(position);
                resolved.push(value);
            } else if let Some(default) = parameter.default_value() {
                resolved.push(default.clone());
            } else {
                return Err(self.missing(parameter));
            }
        }

        if !supplied.is_empty() {
            return Err(self.too_many());
        }

        Ok(resolved)
    }

    fn missing(&self, parameter: &ParameterSpec) -> DispatchError {
        DispatchError::missing_argument(self.handler_name(), &self.method_name, parameter.name())
    }

    fn too_many(&self) -> DispatchError {
        DispatchError::too_many_arguments(self.handler_name(), &self.method_name)
    }
}

impl fmt::Debug for MethodBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBinding")
            .field("handler", &self.handler_name())
            .field("method", &self.method_name)
            .field("parameters", &self.parameters)
            .finish()
    }
}
