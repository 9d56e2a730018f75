//! # Handler Resolvers
//!
//! Collaborators that map a message type to the raw handler object(s) that
//! should receive it. The dispatch core consumes them through two traits and
//! never assumes how the mapping is stored.
//!
//! ## Available Resolvers
//!
//! - **InMemoryCommandHandlerResolver**: type -> one handler, registered at runtime
//! - **InMemoryEventHandlerResolver**: type -> ordered handler list, registered at runtime
//! - **ContainerCommandHandlerResolver**: type -> `<type name><suffix>` service in a [`Container`]
//!
//! ## Architecture
//!
//! ```text
//! Resolver (memoizing)
//! ├── CommandHandlerResolver  (exactly one handler, or NoHandlerForType)
//! └── EventHandlerResolver    (zero or more handlers, in dispatch order)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pathway_core::registry::{CommandHandlerResolver, InMemoryCommandHandlerResolver};
//! use pathway_core::message::MessageType;
//! use pathway_core::value::Value;
//!
//! struct PlaceOrder;
//!
//! let resolver = InMemoryCommandHandlerResolver::new();
//! resolver.register::<PlaceOrder>(Value::from("placeholder"));
//!
//! assert!(resolver.resolve(&MessageType::of::<PlaceOrder>()).is_ok());
//! ```

pub mod container;
pub mod in_memory;

pub use container::{Container, ContainerCommandHandlerResolver};
pub use in_memory::{InMemoryCommandHandlerResolver, InMemoryEventHandlerResolver};

use std::sync::Arc;

use crate::error::Result;
use crate::message::MessageType;
use crate::value::Value;

/// Resolves the single handler for a command type.
///
/// Fails with `NoHandlerForType` when the type is unmapped. The returned
/// value should be a handler object; the dispatch core checks this and
/// reports `CommandHandlerNotAnObject` otherwise.
pub trait CommandHandlerResolver: Send + Sync {
    fn resolve(&self, message_type: &MessageType) -> Result<Value>;
}

/// Resolves the ordered handler list for an event type.
///
/// An unmapped type yields an empty list. Order is dispatch order.
pub trait EventHandlerResolver: Send + Sync {
    fn resolve(&self, message_type: &MessageType) -> Result<Vec<Value>>;
}

impl<T: CommandHandlerResolver + ?Sized> CommandHandlerResolver for Arc<T> {
    fn resolve(&self, message_type: &MessageType) -> Result<Value> {
        (**self).resolve(message_type)
    }
}

impl<T: EventHandlerResolver + ?Sized> EventHandlerResolver for Arc<T> {
    fn resolve(&self, message_type: &MessageType) -> Result<Vec<Value>> {
        (**self).resolve(message_type)
    }
}
