//! # Dispatcher
//!
//! Public entry point of the dispatch core. A dispatch walks
//! `resolve -> prepare -> process -> finalize -> done`; a failure in any
//! stage ends the dispatch and the error reaches the caller unchanged.
//!
//! `prepare` is invoked with `[message, dispatcher]`, where `dispatcher` is a
//! [`DispatcherHandle`] wrapped as an object value, so handlers can dispatch
//! sub-commands and events of their own. Every later stage receives the
//! previous stage's return value as its argument collection.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use super::resolver::Resolver;
use crate::constants::{DispatchStage, MessageKind};
use crate::error::{DispatchError, Result};
use crate::handler::HandlerDescriptor;
use crate::logging::log_dispatch_operation;
use crate::message::MessageType;
use crate::registry::{CommandHandlerResolver, EventHandlerResolver};
use crate::value::{Object, Value};

/// Dispatch operations available to handlers and callers
pub trait DispatcherInterface: Send + Sync {
    /// Run the single handler for `message` and return its `finalize` result
    fn command(&self, message: Object) -> Result<Value>;

    /// Run every handler for `message` in order, discarding their results
    fn event(&self, message: Object) -> Result<()>;
}

/// Shared handle to a dispatcher, as handed to `prepare`
#[derive(Clone)]
pub struct DispatcherHandle(Arc<dyn DispatcherInterface>);

impl DispatcherHandle {
    pub fn new(dispatcher: Arc<dyn DispatcherInterface>) -> Self {
        Self(dispatcher)
    }

    /// Recover the handle from the `dispatcher` argument of a `prepare` body
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?.downcast_ref::<DispatcherHandle>().cloned()
    }

    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl DispatcherInterface for DispatcherHandle {
    fn command(&self, message: Object) -> Result<Value> {
        self.0.command(message)
    }

    fn event(&self, message: Object) -> Result<()> {
        self.0.event(message)
    }
}

impl fmt::Debug for DispatcherHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DispatcherHandle")
    }
}

/// Resolves handlers through a memoizing [`Resolver`] and runs their lifecycle
#[derive(Debug, Clone)]
pub struct Dispatcher {
    resolver: Arc<Resolver>,
}

impl Dispatcher {
    pub fn new(
        command_handlers: Arc<dyn CommandHandlerResolver>,
        event_handlers: Arc<dyn EventHandlerResolver>,
    ) -> Self {
        Self::with_resolver(Arc::new(Resolver::new(command_handlers, event_handlers)))
    }

    /// Share an existing resolver, and its caches, with this dispatcher
    pub fn with_resolver(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// A handle to this dispatcher suitable for passing to handlers
    pub fn handle(&self) -> DispatcherHandle {
        DispatcherHandle::new(Arc::new(self.clone()))
    }

    #[instrument(skip_all, fields(message_type = %message.type_name()))]
    pub fn command(&self, message: Object) -> Result<Value> {
        let message_type = MessageType::of_object(&message);
        let descriptor = self
            .resolver
            .command(&message_type)
            .inspect_err(|err| log_resolve_failure(MessageKind::Command, &message_type, err))?;

        self.run_pipeline(MessageKind::Command, &message_type, &descriptor, &message)
    }

    #[instrument(skip_all, fields(message_type = %message.type_name()))]
    pub fn event(&self, message: Object) -> Result<()> {
        let message_type = MessageType::of_object(&message);
        let descriptors = self
            .resolver
            .event(&message_type)
            .inspect_err(|err| log_resolve_failure(MessageKind::Event, &message_type, err))?;

        debug!(handlers = descriptors.len(), "Dispatching event");

        for descriptor in descriptors.iter() {
            self.run_pipeline(MessageKind::Event, &message_type, descriptor, &message)?;
        }

        Ok(())
    }

    /// Wrap `message` and dispatch it as a command
    pub fn dispatch_command<M: Any + Send + Sync>(&self, message: M) -> Result<Value> {
        self.command(Object::new(message))
    }

    /// Wrap `message` and dispatch it as an event
    pub fn dispatch_event<M: Any + Send + Sync>(&self, message: M) -> Result<()> {
        self.event(Object::new(message))
    }

    fn run_pipeline(
        &self,
        kind: MessageKind,
        message_type: &MessageType,
        descriptor: &HandlerDescriptor,
        message: &Object,
    ) -> Result<Value> {
        let handler = descriptor.handler_name();
        let stages = [
            (DispatchStage::Prepare, descriptor.prepare()),
            (DispatchStage::Process, descriptor.process()),
            (DispatchStage::Finalize, descriptor.finalize()),
        ];

        let mut value = Value::list([
            Value::Object(message.clone()),
            self.handle().into_value(),
        ]);

        for (stage, binding) in stages {
            trace!(handler, stage = %stage, "Invoking lifecycle stage");

            value = binding.invoke(value).inspect_err(|err| {
                let details = format!("{}: {err}", err.code());
                log_dispatch_operation(kind, message_type.as_str(), Some(handler), stage, "failed", Some(&details));
            })?;
        }

        log_dispatch_operation(kind, message_type.as_str(), Some(handler), DispatchStage::Done, "completed", None);
        Ok(value)
    }
}

fn log_resolve_failure(kind: MessageKind, message_type: &MessageType, err: &DispatchError) {
    let details = format!("{}: {err}", err.code());
    log_dispatch_operation(kind, message_type.as_str(), None, DispatchStage::Resolve, "failed", Some(&details));
}

impl DispatcherInterface for Dispatcher {
    fn command(&self, message: Object) -> Result<Value> {
        Dispatcher::command(self, message)
    }

    fn event(&self, message: Object) -> Result<()> {
        Dispatcher::event(self, message)
    }
}
