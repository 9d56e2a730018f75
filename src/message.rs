//! Message type identity.
//!
//! Handlers are resolved by the type of the message being dispatched. The
//! identity is captured when the message is wrapped into an [`Object`], so
//! `MessageType::of::<T>()` and the type of an `Object::new(t)` always agree.
//!
//! Type names are not unique (two versions of one crate can share them), so
//! identities taken from a Rust type also carry its [`TypeId`]. The name alone
//! is used for display and for the container's naming convention.

use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;

use crate::value::Object;

/// Stable identity of a message type, used as the resolver cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageType {
    name: Cow<'static, str>,
    type_id: Option<TypeId>,
}

impl MessageType {
    /// Identity of the Rust type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: Cow::Borrowed(type_name::<T>()),
            type_id: Some(TypeId::of::<T>()),
        }
    }

    /// Identity of the value wrapped in `message`
    pub fn of_object(message: &Object) -> Self {
        Self {
            name: Cow::Borrowed(message.type_name()),
            type_id: Some(message.value_type_id()),
        }
    }

    /// Identity from an explicit name, for resolvers keyed by configuration.
    /// Never equal to an identity taken from a Rust type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            type_id: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for MessageType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
