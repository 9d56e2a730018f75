//! # Memoizing Resolver
//!
//! Maps a message type to ready-to-invoke [`HandlerDescriptor`]s, asking the
//! handler-resolver collaborators and the descriptor factory only on the
//! first request for each type.
//!
//! ## Caching
//!
//! - Entries are created lazily and live as long as the resolver; there is
//!   no eviction or refresh.
//! - Lookup and insert for a type happen under the cache shard's write lock,
//!   so concurrent first requests build the descriptor exactly once and all
//!   callers observe the same `Arc`.
//! - A failed build stores nothing. Event lists are cached only once every
//!   handler in them has been built, so for `[H1, not_an_object]` the
//!   descriptor already built for `H1` is discarded with the error and the
//!   next request asks the collaborator again. No partial list is ever
//!   observable.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, trace, warn};

use crate::error::{DispatchError, Result};
use crate::handler::{HandlerDescriptor, HandlerDescriptorFactory};
use crate::message::MessageType;
use crate::registry::{CommandHandlerResolver, EventHandlerResolver};

/// Ordered, shared list of the descriptors listening to one event type
pub type EventHandlers = Arc<[Arc<HandlerDescriptor>]>;

/// Statistics about the resolver caches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub cached_commands: usize,
    pub cached_events: usize,
    pub command_types: Vec<String>,
    pub event_types: Vec<String>,
}

pub struct Resolver {
    command_handlers: Arc<dyn CommandHandlerResolver>,
    event_handlers: Arc<dyn EventHandlerResolver>,
    factory: HandlerDescriptorFactory,
    command_cache: DashMap<MessageType, Arc<HandlerDescriptor>>,
    event_cache: DashMap<MessageType, EventHandlers>,
}

impl Resolver {
    pub fn new(
        command_handlers: Arc<dyn CommandHandlerResolver>,
        event_handlers: Arc<dyn EventHandlerResolver>,
    ) -> Self {
        Self {
            command_handlers,
            event_handlers,
            factory: HandlerDescriptorFactory::new(),
            command_cache: DashMap::new(),
            event_cache: DashMap::new(),
        }
    }

    /// The descriptor of the single handler for commands of `message_type`
    pub fn command(&self, message_type: &MessageType) -> Result<Arc<HandlerDescriptor>> {
        if let Some(cached) = self.command_cache.get(message_type) {
            trace!(message_type = %message_type, "Command handler cache hit");
            return Ok(Arc::clone(cached.value()));
        }

        let entry = self
            .command_cache
            .entry(message_type.clone())
            .or_try_insert_with(|| self.build_command(message_type))?;

        Ok(Arc::clone(entry.value()))
    }

    /// The descriptors of every handler for events of `message_type`, in dispatch order
    pub fn event(&self, message_type: &MessageType) -> Result<EventHandlers> {
        if let Some(cached) = self.event_cache.get(message_type) {
            trace!(message_type = %message_type, "Event handler cache hit");
            return Ok(Arc::clone(cached.value()));
        }

        let entry = self
            .event_cache
            .entry(message_type.clone())
            .or_try_insert_with(|| self.build_event(message_type))?;

        Ok(Arc::clone(entry.value()))
    }

    pub fn is_command_cached(&self, message_type: &MessageType) -> bool {
        self.command_cache.contains_key(message_type)
    }

    pub fn is_event_cached(&self, message_type: &MessageType) -> bool {
        self.event_cache.contains_key(message_type)
    }

    pub fn stats(&self) -> ResolverStats {
        let mut command_types: Vec<String> = self
            .command_cache
            .iter()
            .map(|entry| entry.key().to_string())
            .collect();
        let mut event_types: Vec<String> = self
            .event_cache
            .iter()
            .map(|entry| entry.key().to_string())
            .collect();
        command_types.sort();
        event_types.sort();

        ResolverStats {
            cached_commands: command_types.len(),
            cached_events: event_types.len(),
            command_types,
            event_types,
        }
    }

    fn build_command(&self, message_type: &MessageType) -> Result<Arc<HandlerDescriptor>> {
        debug!(message_type = %message_type, "Resolving command handler");

        let result = self
            .command_handlers
            .resolve(message_type)
            .and_then(|handler| {
                handler.into_object().map_err(|found| {
                    DispatchError::command_handler_not_an_object(message_type, &found)
                })
            })
            .and_then(|handler| self.factory.create(&handler));

        match result {
            Ok(descriptor) => {
                info!(
                    message_type = %message_type,
                    handler = descriptor.handler_name(),
                    "Command handler registered"
                );
                Ok(Arc::new(descriptor))
            }
            Err(err) => {
                warn!(message_type = %message_type, code = %err.code(), error = %err, "Command handler resolution failed");
                Err(err)
            }
        }
    }

    fn build_event(&self, message_type: &MessageType) -> Result<EventHandlers> {
        debug!(message_type = %message_type, "Resolving event handlers");

        let handlers = self.event_handlers.resolve(message_type)?;
        let mut descriptors = Vec::with_capacity(handlers.len());

        for (index, handler) in handlers.into_iter().enumerate() {
            let handler = handler.into_object().map_err(|found| {
                warn!(message_type = %message_type, index, found = %found.type_label(), "Event handler is not an object");
                DispatchError::event_handler_not_an_object(message_type, index, &found)
            })?;

            descriptors.push(Arc::new(self.factory.create(&handler)?));
        }

        info!(
            message_type = %message_type,
            handlers = descriptors.len(),
            "Event handlers registered"
        );

        Ok(descriptors.into())
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("cached_commands", &self.command_cache.len())
            .field("cached_events", &self.event_cache.len())
            .finish_non_exhaustive()
    }
}
