//! Command handler resolution through a service container.
//!
//! The handler for a command type is looked up under the id formed by
//! appending a suffix to the type name: with the default suffix, commands of
//! type `app::RegisterUser` are handled by the service `app::RegisterUserHandler`.

use std::collections::HashMap;

use tracing::debug;

use super::CommandHandlerResolver;
use crate::config::ContainerConfig;
use crate::constants::system::DEFAULT_HANDLER_SUFFIX;
use crate::error::{DispatchError, Result};
use crate::message::MessageType;
use crate::value::Value;

/// A service container the resolver can query by id
pub trait Container: Send + Sync {
    fn has(&self, id: &str) -> bool;

    fn get(&self, id: &str) -> Option<Value>;
}

impl Container for HashMap<String, Value> {
    fn has(&self, id: &str) -> bool {
        self.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<Value> {
        HashMap::get(self, id).cloned()
    }
}

/// Resolves command handlers from a [`Container`] by naming convention
#[derive(Debug)]
pub struct ContainerCommandHandlerResolver<C> {
    container: C,
    suffix: String,
}

impl<C: Container> ContainerCommandHandlerResolver<C> {
    pub fn new(container: C) -> Self {
        Self {
            container,
            suffix: DEFAULT_HANDLER_SUFFIX.to_string(),
        }
    }

    pub fn from_config(container: C, config: &ContainerConfig) -> Self {
        Self {
            container,
            suffix: config.handler_suffix.clone(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Service id expected to hold the handler for `message_type`
    pub fn handler_id(&self, message_type: &MessageType) -> String {
        format!("{}{}", message_type, self.suffix)
    }

    pub fn container(&self) -> &C {
        &self.container
    }
}

impl<C: Container> CommandHandlerResolver for ContainerCommandHandlerResolver<C> {
    fn resolve(&self, message_type: &MessageType) -> Result<Value> {
        let handler_id = self.handler_id(message_type);

        if !self.container.has(&handler_id) {
            debug!(
                message_type = %message_type,
                expected_id = %handler_id,
                "No container service for command"
            );
            return Err(DispatchError::no_handler_for_type(message_type));
        }

        self.container
            .get(&handler_id)
            .ok_or_else(|| DispatchError::no_handler_for_type(message_type))
    }
}
