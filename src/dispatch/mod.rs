//! # Dispatch
//!
//! The memoizing [`Resolver`] and the [`Dispatcher`] that runs handler
//! lifecycles on top of it.
//!
//! ```text
//! Dispatcher::command(message)
//!   -> Resolver::command(type)      cache hit, or resolve + HandlerDescriptorFactory
//!   -> prepare.invoke([message, dispatcher])
//!   -> process.invoke(prepared)
//!   -> finalize.invoke(processed)   returned to the caller
//! ```

pub mod dispatcher;
pub mod resolver;

pub use dispatcher::{Dispatcher, DispatcherHandle, DispatcherInterface};
pub use resolver::{EventHandlers, Resolver, ResolverStats};
