//! Scoped context registry.
//!
//! Providers bind a value for the extent of a closure; accessors resolve the
//! nearest enclosing binding of a given type on the current thread.

mod context;

pub use context::{depth, has_context, provide_context, use_context};
