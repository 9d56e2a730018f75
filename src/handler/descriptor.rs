//! Handler descriptors: the three bound lifecycle methods of one handler.

use tracing::debug;

use super::binding::MethodBinding;
use crate::constants::lifecycle::{FINALIZE, PREPARE, PROCESS};
use crate::error::Result;
use crate::value::Object;

/// The `prepare`, `process` and `finalize` bindings of a single handler instance
#[derive(Debug, Clone)]
pub struct HandlerDescriptor {
    prepare: MethodBinding,
    process: MethodBinding,
    finalize: MethodBinding,
}

impl HandlerDescriptor {
    pub fn new(prepare: MethodBinding, process: MethodBinding, finalize: MethodBinding) -> Self {
        Self {
            prepare,
            process,
            finalize,
        }
    }

    pub fn prepare(&self) -> &MethodBinding {
        &self.prepare
    }

    pub fn process(&self) -> &MethodBinding {
        &self.process
    }

    pub fn finalize(&self) -> &MethodBinding {
        &self.finalize
    }

    pub fn handler_name(&self) -> &str {
        self.prepare.handler_name()
    }
}

/// Builds [`HandlerDescriptor`]s from raw handler objects. Performs no caching.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerDescriptorFactory;

impl HandlerDescriptorFactory {
    pub fn new() -> Self {
        Self
    }

    /// Bind `prepare`, `process` and `finalize`, in that order
    pub fn create(&self, handler: &Object) -> Result<HandlerDescriptor> {
        let prepare = MethodBinding::bind(handler, PREPARE)?;
        let process = MethodBinding::bind(handler, PROCESS)?;
        let finalize = MethodBinding::bind(handler, FINALIZE)?;

        debug!(
            handler = prepare.handler_name(),
            "Built handler descriptor"
        );

        Ok(HandlerDescriptor::new(prepare, process, finalize))
    }
}
