#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Pathway Core
//!
//! Message-dispatch core: given a command or event object, it locates the
//! handler(s) for the message's type, binds each handler's `prepare`,
//! `process` and `finalize` methods, and runs them in order, threading each
//! stage's output into the next stage's input.
//!
//! ## Architecture
//!
//! ```text
//! Dispatcher ──> Resolver (memoizing) ──> CommandHandlerResolver / EventHandlerResolver
//!     │               └──> HandlerDescriptorFactory ──> MethodBinding::bind x3
//!     └──> HandlerDescriptor ──> MethodBinding::invoke (prepare -> process -> finalize)
//! ```
//!
//! ## Module Organization
//!
//! - [`value`] - Dynamic values exchanged between stages
//! - [`handler`] - Handler declaration, method binding and argument resolution
//! - [`registry`] - Type-to-handler resolvers
//! - [`dispatch`] - Memoizing resolver and the dispatcher pipeline
//! - [`error`] - Structured error handling
//! - [`config`] - Layered configuration for logging and container conventions
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use pathway_core::handler::{HandlerBuilder, Method};
//! use pathway_core::registry::{InMemoryCommandHandlerResolver, InMemoryEventHandlerResolver};
//! use pathway_core::value::Value;
//! use pathway_core::Dispatcher;
//!
//! struct Greet;
//!
//! # fn main() -> pathway_core::Result<()> {
//! let handler = HandlerBuilder::new("GreetHandler")
//!     .method(
//!         Method::new("prepare")
//!             .param("message")
//!             .param("dispatcher")
//!             .body(|_| Ok(Value::map([("name", "world")]))),
//!     )
//!     .method(
//!         Method::new("process")
//!             .param("name")
//!             .body(|args| Ok(Value::list([format!("hello {}", args[0].as_str().unwrap_or(""))]))),
//!     )
//!     .method(Method::new("finalize").param("greeting").body(|args| Ok(args[0].clone())))
//!     .into_value()?;
//!
//! let commands = InMemoryCommandHandlerResolver::new().with::<Greet>(handler);
//! let dispatcher = Dispatcher::new(Arc::new(commands), Arc::new(InMemoryEventHandlerResolver::new()));
//!
//! assert_eq!(dispatcher.dispatch_command(Greet)?, Value::from("hello world"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod logging;
pub mod message;
pub mod registry;
pub mod value;

pub use config::{ConfigManager, PathwayConfig};
pub use constants::{DispatchStage, MessageKind};
pub use dispatch::{Dispatcher, DispatcherHandle, DispatcherInterface, Resolver, ResolverStats};
pub use error::{DispatchError, ErrorCode, Result};
pub use handler::{
    HandlerBuilder, HandlerDescriptor, HandlerDescriptorFactory, HandlerObject, Method,
    MethodBinding, ParameterSpec,
};
pub use logging::{init_structured_logging, init_with_config};
pub use message::MessageType;
pub use registry::{CommandHandlerResolver, EventHandlerResolver};
pub use value::{Array, Key, Object, Value};
