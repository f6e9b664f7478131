//! Quill runtime function core
//!
//! This library provides the function-registration and dispatch core of the
//! Quill DSL runtime:
//! - Environment-scoped, thread-safe function tables
//! - Arity-checked invocation wrappers built at definition time
//! - Root/current-environment merged lookup with autoload-on-miss
//! - Documentation and enumeration of registered functions

/// Quill runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod environment;
pub mod logging;
pub mod registry;
pub mod value;

// Re-export commonly used types
pub use environment::Environment;
pub use logging::{LogSink, ServerLog, Severity};
pub use registry::{
    Arity, Autoloader, FunctionBuilder, FunctionKind, FunctionMetadata, FunctionRegistry,
    FunctionTable, InvokeFn, NoAutoload,
};
pub use value::{RuntimeError, Value};
