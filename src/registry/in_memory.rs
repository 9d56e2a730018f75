//! In-memory handler resolvers backed by maps that can be filled at runtime.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::{CommandHandlerResolver, EventHandlerResolver};
use crate::error::{DispatchError, Result};
use crate::message::MessageType;
use crate::value::Value;

/// Maps each command type to exactly one handler
#[derive(Debug, Default)]
pub struct InMemoryCommandHandlerResolver {
    handlers: RwLock<HashMap<MessageType, Value>>,
}

impl InMemoryCommandHandlerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for commands of type `M`, replacing any previous one
    pub fn register<M: ?Sized + 'static>(&self, handler: Value) {
        self.register_type(MessageType::of::<M>(), handler);
    }

    pub fn register_type(&self, message_type: MessageType, handler: Value) {
        debug!(message_type = %message_type, "Registering command handler");
        self.handlers.write().insert(message_type, handler);
    }

    /// Builder-style registration
    pub fn with<M: ?Sized + 'static>(self, handler: Value) -> Self {
        self.register::<M>(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl CommandHandlerResolver for InMemoryCommandHandlerResolver {
    fn resolve(&self, message_type: &MessageType) -> Result<Value> {
        self.handlers
            .read()
            .get(message_type)
            .cloned()
            .ok_or_else(|| DispatchError::no_handler_for_type(message_type))
    }
}

/// Maps each event type to an ordered list of handlers
#[derive(Debug, Default)]
pub struct InMemoryEventHandlerResolver {
    handlers: RwLock<HashMap<MessageType, Vec<Value>>>,
}

impl InMemoryEventHandlerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the listeners of events of type `M`
    pub fn register<M: ?Sized + 'static>(&self, handler: Value) {
        self.register_type(MessageType::of::<M>(), handler);
    }

    pub fn register_type(&self, message_type: MessageType, handler: Value) {
        debug!(message_type = %message_type, "Registering event handler");
        self.handlers
            .write()
            .entry(message_type)
            .or_default()
            .push(handler);
    }

    /// Builder-style registration of a whole listener list
    pub fn with<M: ?Sized + 'static>(self, handlers: Vec<Value>) -> Self {
        for handler in handlers {
            self.register::<M>(handler);
        }
        self
    }

    pub fn listener_count(&self, message_type: &MessageType) -> usize {
        self.handlers
            .read()
            .get(message_type)
            .map_or(0, Vec::len)
    }
}

impl EventHandlerResolver for InMemoryEventHandlerResolver {
    fn resolve(&self, message_type: &MessageType) -> Result<Vec<Value>> {
        Ok(self
            .handlers
            .read()
            .get(message_type)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    struct CancelOrder;
    struct OrderCancelled;

    #[test]
    fn test_command_resolution() {
        let resolver = InMemoryCommandHandlerResolver::new().with::<CancelOrder>(Value::from("h"));

        assert_eq!(
            resolver.resolve(&MessageType::of::<CancelOrder>()).unwrap(),
            Value::from("h")
        );
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_command_unmapped() {
        let resolver = InMemoryCommandHandlerResolver::new();

        let err = resolver
            .resolve(&MessageType::of::<CancelOrder>())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoHandlerForType);
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_event_order_and_default() {
        let resolver = InMemoryEventHandlerResolver::new().with::<OrderCancelled>(vec![
            Value::from("first"),
            Value::from("second"),
        ]);
        resolver.register::<OrderCancelled>(Value::from("third"));

        let handlers = resolver
            .resolve(&MessageType::of::<OrderCancelled>())
            .unwrap();
        assert_eq!(
            handlers,
            vec![Value::from("first"), Value::from("second"), Value::from("third")]
        );

        assert!(resolver
            .resolve(&MessageType::of::<CancelOrder>())
            .unwrap()
            .is_empty());
        assert_eq!(resolver.listener_count(&MessageType::of::<CancelOrder>()), 0);
    }
}
