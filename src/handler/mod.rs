//! # Handler Binding
//!
//! Everything between a raw handler object and a ready-to-call lifecycle:
//!
//! - [`HandlerBuilder`] / [`Method`] - declare a handler's methods and signatures
//! - [`MethodBinding`] - one bound method; resolves argument collections per call
//! - [`Arguments`] - the positional/named argument shape, detected once per call
//! - [`HandlerDescriptor`] / [`HandlerDescriptorFactory`] - the three lifecycle bindings
//!
//! ```text
//! HandlerObject --Factory--> HandlerDescriptor
//!                              ├── prepare:  MethodBinding
//!                              ├── process:  MethodBinding
//!                              └── finalize: MethodBinding
//! ```

mod arguments;
mod binding;
mod descriptor;
mod object;
mod parameter;

pub use arguments::Arguments;
pub use binding::MethodBinding;
pub use descriptor::{HandlerDescriptor, HandlerDescriptorFactory};
pub use object::{
    HandlerBuilder, HandlerObject, Method, MethodBody, MethodDef, Receiver, Visibility,
};
pub use parameter::ParameterSpec;
