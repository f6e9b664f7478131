//! Built-in functions seeded on registry reset
//!
//! One logging function per supported severity level, named after the bare
//! level. Each is variadic: it joins its arguments with a single space and
//! emits the line through the registry's log sink at that severity.

use std::sync::Arc;

use crate::environment::Environment;
use crate::logging::{LogSink, Severity};
use crate::value::Value;

use super::function::FunctionBuilder;
use super::FunctionRegistry;

pub(crate) fn install(registry: &FunctionRegistry) {
    let root = Environment::root();
    for severity in Severity::ALL {
        let sink: Arc<dyn LogSink> = Arc::clone(registry.sink());
        let builder = FunctionBuilder::new(severity.name())
            .doc(format!("Log a message on the server at level {}.", severity))
            .implementation(move |args| {
                let message = args
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                sink.emit(severity, &message);
                Ok(Value::Null)
            });
        registry
            .define(&root, builder)
            .expect("log builtins always carry an implementation");
    }
}
