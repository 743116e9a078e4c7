//! Route handlers and the name-based handler registry.

mod registry;
mod types;

pub use registry::HandlerRegistry;
pub use types::{Handler, HandlerFunc, HandlerType};
