//! Runtime value representation
//!
//! Shared value representation passed between the evaluator and registered
//! functions. Arguments always arrive as one batched slice of values.
//! - Numbers, Bools, Null: immediate values
//! - Strings: heap-allocated, reference-counted (Arc<String>), immutable
//! - Arrays: plain vectors of values

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<String>),
    Array(Vec<Value>),
}

impl Value {
    /// Convenience constructor for string values.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                // Format number nicely (no trailing .0 for whole numbers)
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Array(arr) => {
                let elements: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
        }
    }
}

/// Errors raised by the registry and by invocation wrappers.
///
/// Definition-time errors (`InvalidConfiguration`) abort the `define` call
/// with no partial registration. Invocation-time errors are recoverable by
/// the evaluator and surface to the script author as call errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Bad function definition: missing implementation or unknown kind tag
    #[error("invalid configuration for function '{name}': {msg}")]
    InvalidConfiguration { name: String, msg: String },
    /// Exact-arity violation
    #[error("wrong number of arguments for '{name}' (given {given} for exactly {expected})")]
    ArgumentCount {
        name: String,
        given: usize,
        expected: usize,
    },
    /// Minimum-arity violation on a variadic function
    #[error("wrong number of arguments for '{name}' (given {given} for minimum {minimum})")]
    ArgumentCountMinimum {
        name: String,
        given: usize,
        minimum: usize,
    },
    /// Invocation without the single-batched-sequence convention.
    /// A caller/integration bug, not a script-author error.
    #[error("function '{name}' must be invoked with a single argument sequence")]
    InvalidCallConvention { name: String },
    /// Type error raised by a function implementation
    #[error("type error: {msg}")]
    TypeError { msg: String },
}
