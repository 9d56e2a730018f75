//! # Dispatch Error Types
//!
//! Structured error handling for the dispatch core using thiserror.
//!
//! Every failure the core detects is a programmer or configuration error:
//! nothing here is caught or retried internally. Errors are raised at the
//! point of detection and travel unchanged through the resolver and the
//! dispatcher up to the caller.

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::message::MessageType;
use crate::value::Value;

/// Stable classification of a [`DispatchError`], usable in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MethodNotFound,
    MethodNotCallable,
    InvalidArgumentShape,
    MissingArgument,
    TooManyArguments,
    NoHandlerForType,
    EventHandlerNotAnObject,
    CommandHandlerNotAnObject,
    InvalidSignature,
    Handler,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MethodNotFound => "method_not_found",
            ErrorCode::MethodNotCallable => "method_not_callable",
            ErrorCode::InvalidArgumentShape => "invalid_argument_shape",
            ErrorCode::MissingArgument => "missing_argument",
            ErrorCode::TooManyArguments => "too_many_arguments",
            ErrorCode::NoHandlerForType => "no_handler_for_type",
            ErrorCode::EventHandlerNotAnObject => "event_handler_not_an_object",
            ErrorCode::CommandHandlerNotAnObject => "command_handler_not_an_object",
            ErrorCode::InvalidSignature => "invalid_signature",
            ErrorCode::Handler => "handler",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while resolving handlers and invoking their lifecycle methods
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Method {handler}::{method}() does not exist")]
    MethodNotFound { handler: String, method: String },

    #[error("Method {handler}::{method}() must be a public instance method")]
    MethodNotCallable { handler: String, method: String },

    #[error("Arguments for {handler}::{method}() must be a list or a name-keyed map, got {found}")]
    InvalidArgumentShape {
        handler: String,
        method: String,
        found: String,
    },

    #[error("Missing argument ${parameter} for {handler}::{method}()")]
    MissingArgument {
        handler: String,
        method: String,
        parameter: String,
    },

    #[error("Too many arguments for {handler}::{method}()")]
    TooManyArguments { handler: String, method: String },

    #[error("No handler found for command \"{message_type}\"")]
    NoHandlerForType { message_type: String },

    #[error("Handler #{index} for event \"{message_type}\" must be an object, got {found}")]
    EventHandlerNotAnObject {
        message_type: String,
        index: usize,
        found: String,
    },

    #[error("Handler for command \"{message_type}\" must be an object, got {found}")]
    CommandHandlerNotAnObject { message_type: String, found: String },

    #[error("Invalid signature for {handler}::{method}(): {reason}")]
    InvalidSignature {
        handler: String,
        method: String,
        reason: String,
    },

    /// An error raised by a handler's own `prepare`/`process`/`finalize` body.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl DispatchError {
    pub fn method_not_found(handler: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            handler: handler.into(),
            method: method.into(),
        }
    }

    pub fn method_not_callable(handler: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotCallable {
            handler: handler.into(),
            method: method.into(),
        }
    }

    pub fn invalid_argument_shape(
        handler: impl Into<String>,
        method: impl Into<String>,
        found: &Value,
    ) -> Self {
        Self::InvalidArgumentShape {
            handler: handler.into(),
            method: method.into(),
            found: found.shape_label(),
        }
    }

    pub fn missing_argument(
        handler: impl Into<String>,
        method: impl Into<String>,
        parameter: impl Into<String>,
    ) -> Self {
        Self::MissingArgument {
            handler: handler.into(),
            method: method.into(),
            parameter: parameter.into(),
        }
    }

    pub fn too_many_arguments(handler: impl Into<String>, method: impl Into<String>) -> Self {
        Self::TooManyArguments {
            handler: handler.into(),
            method: method.into(),
        }
    }

    pub fn no_handler_for_type(message_type: &MessageType) -> Self {
        Self::NoHandlerForType {
            message_type: message_type.to_string(),
        }
    }

    pub fn event_handler_not_an_object(
        message_type: &MessageType,
        index: usize,
        found: &Value,
    ) -> Self {
        Self::EventHandlerNotAnObject {
            message_type: message_type.to_string(),
            index,
            found: found.type_label(),
        }
    }

    pub fn command_handler_not_an_object(message_type: &MessageType, found: &Value) -> Self {
        Self::CommandHandlerNotAnObject {
            message_type: message_type.to_string(),
            found: found.type_label(),
        }
    }

    pub fn invalid_signature(
        handler: impl Into<String>,
        method: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSignature {
            handler: handler.into(),
            method: method.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MethodNotFound { .. } => ErrorCode::MethodNotFound,
            Self::MethodNotCallable { .. } => ErrorCode::MethodNotCallable,
            Self::InvalidArgumentShape { .. } => ErrorCode::InvalidArgumentShape,
            Self::MissingArgument { .. } => ErrorCode::MissingArgument,
            Self::TooManyArguments { .. } => ErrorCode::TooManyArguments,
            Self::NoHandlerForType { .. } => ErrorCode::NoHandlerForType,
            Self::EventHandlerNotAnObject { .. } => ErrorCode::EventHandlerNotAnObject,
            Self::CommandHandlerNotAnObject { .. } => ErrorCode::CommandHandlerNotAnObject,
            Self::InvalidSignature { .. } => ErrorCode::InvalidSignature,
            Self::Handler(_) => ErrorCode::Handler,
        }
    }

    /// The `(handler, method)` pair this error was raised for, when it concerns a binding
    pub fn binding(&self) -> Option<(&str, &str)> {
        match self {
            Self::MethodNotFound { handler, method }
            | Self::MethodNotCallable { handler, method }
            | Self::InvalidArgumentShape {
                handler, method, ..
            }
            | Self::MissingArgument {
                handler, method, ..
            }
            | Self::TooManyArguments { handler, method }
            | Self::InvalidSignature {
                handler, method, ..
            } => Some((handler.as_str(), method.as_str())),
            _ => None,
        }
    }

    /// Borrow the error raised by a handler body, if this is one
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }

    /// Structured view of the error for logs and error reports
    pub fn snapshot(&self) -> serde_json::Value {
        let mut fields = serde_json::Map::new();
        fields.insert("code".into(), json!(self.code()));

        if let Some((handler, method)) = self.binding() {
            fields.insert("handler".into(), json!(handler));
            fields.insert("method".into(), json!(method));
        }

        match self {
            Self::MissingArgument { parameter, .. } => {
                fields.insert("parameter".into(), json!(parameter));
            }
            Self::InvalidArgumentShape { found, .. } => {
                fields.insert("found".into(), json!(found));
            }
            Self::NoHandlerForType { message_type } => {
                fields.insert("message_type".into(), json!(message_type));
            }
            Self::EventHandlerNotAnObject {
                message_type,
                index,
                found,
            } => {
                fields.insert("message_type".into(), json!(message_type));
                fields.insert("index".into(), json!(index));
                fields.insert("found".into(), json!(found));
            }
            Self::CommandHandlerNotAnObject {
                message_type,
                found,
            } => {
                fields.insert("message_type".into(), json!(message_type));
                fields.insert("found".into(), json!(found));
            }
            Self::InvalidSignature { reason, .. } => {
                fields.insert("reason".into(), json!(reason));
            }
            Self::Handler(err) => {
                fields.insert("message".into(), json!(err.to_string()));
            }
            _ => {}
        }

        serde_json::Value::Object(fields)
    }
}

/// Handler bodies report failures as `anyhow::Error`. A `DispatchError` that
/// a body picked up from a nested dispatch is unwrapped back to itself so it
/// reaches the caller exactly as it was raised.
impl From<anyhow::Error> for DispatchError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(dispatch_error) => dispatch_error,
            Err(other) => Self::Handler(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
