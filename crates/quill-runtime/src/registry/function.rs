//! Function metadata and invocation-wrapper construction
//!
//! Every registered function is described by an immutable
//! [`FunctionMetadata`] record whose `invoke` handle is an arity-checking
//! wrapper around the raw implementation. The wrapper is generated once, at
//! definition time, by [`FunctionBuilder::build`].

use std::fmt;
use std::sync::Arc;

use crate::value::{RuntimeError, Value};

/// Wrapped callable stored in function metadata. The evaluator packs all
/// actual arguments into one slice before invoking.
pub type InvokeFn = Arc<dyn Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync>;

type RawImpl = Box<dyn Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync>;

/// Declared required-argument-count contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// At least this many arguments, open-ended above.
    AtLeast(usize),
}

impl Arity {
    /// Decode the integer form used at the API boundary: a non-negative
    /// value requires exactly that many arguments; a negative value `n`
    /// requires at least `|n| - 1` (so -1 is fully variadic).
    pub fn from_declared(raw: i32) -> Self {
        if raw >= 0 {
            Arity::Exact(raw as usize)
        } else {
            Arity::AtLeast(raw.unsigned_abs() as usize - 1)
        }
    }

    /// Integer form of this arity (inverse of [`Arity::from_declared`]).
    pub fn declared(self) -> i32 {
        match self {
            Arity::Exact(n) => n as i32,
            Arity::AtLeast(m) => -(m as i32) - 1,
        }
    }

    /// Validate an actual argument count against this contract.
    pub fn check(self, name: &str, given: usize) -> Result<(), RuntimeError> {
        match self {
            Arity::Exact(expected) if given != expected => Err(RuntimeError::ArgumentCount {
                name: name.to_string(),
                given,
                expected,
            }),
            Arity::AtLeast(minimum) if given < minimum => {
                Err(RuntimeError::ArgumentCountMinimum {
                    name: name.to_string(),
                    given,
                    minimum,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for Arity {
    fn default() -> Self {
        Arity::AtLeast(0)
    }
}

/// Whether a function may appear in value-producing position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    /// Called for effect; produces no usable value.
    Statement,
    /// Produces a value and may appear in expressions.
    RValue,
}

impl FunctionKind {
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Statement => "statement",
            FunctionKind::RValue => "rvalue",
        }
    }

    /// Parse a textual kind tag (plugin manifests, DSL-side declarations).
    /// Anything but the two known tags is a configuration error.
    pub fn parse(name: &str, tag: &str) -> Result<Self, RuntimeError> {
        match tag {
            "statement" => Ok(FunctionKind::Statement),
            "rvalue" => Ok(FunctionKind::RValue),
            other => Err(RuntimeError::InvalidConfiguration {
                name: name.to_string(),
                msg: format!("unknown function kind '{}'", other),
            }),
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable record describing one registered function.
///
/// Doubles as the invocation handle returned by lookup: cloning shares the
/// wrapped callable.
#[derive(Clone)]
pub struct FunctionMetadata {
    name: String,
    arity: Arity,
    kind: FunctionKind,
    doc: Option<String>,
    invoke: InvokeFn,
}

impl FunctionMetadata {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn is_rvalue(&self) -> bool {
        self.kind == FunctionKind::RValue
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Invoke through the arity-checking wrapper.
    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        (self.invoke)(args)
    }

    /// Invoke with the evaluator's packed argument value. Anything but an
    /// array violates the batched-call convention.
    pub fn call_packed(&self, argv: &Value) -> Result<Value, RuntimeError> {
        match argv {
            Value::Array(args) => self.call(args),
            _ => Err(RuntimeError::InvalidCallConvention {
                name: self.name.clone(),
            }),
        }
    }

    /// Shared handle to the wrapped callable.
    pub fn invoke_handle(&self) -> InvokeFn {
        Arc::clone(&self.invoke)
    }
}

impl fmt::Debug for FunctionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionMetadata")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("kind", &self.kind)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// Builder for registered functions.
///
/// Defaults: fully variadic (`AtLeast(0)`), `Statement`, undocumented.
/// `build` fails with `InvalidConfiguration` when no implementation was
/// supplied; no partial metadata escapes.
pub struct FunctionBuilder {
    name: String,
    arity: Arity,
    kind: FunctionKind,
    doc: Option<String>,
    implementation: Option<RawImpl>,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: Arity::default(),
            kind: FunctionKind::Statement,
            doc: None,
            implementation: None,
        }
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Set the arity from its integer form (see [`Arity::from_declared`]).
    pub fn declared_arity(mut self, raw: i32) -> Self {
        self.arity = Arity::from_declared(raw);
        self
    }

    pub fn kind(mut self, kind: FunctionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for `.kind(FunctionKind::RValue)`.
    pub fn rvalue(mut self) -> Self {
        self.kind = FunctionKind::RValue;
        self
    }

    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    pub fn implementation<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        self.implementation = Some(Box::new(f));
        self
    }

    pub(crate) fn name_ref(&self) -> &str {
        &self.name
    }

    /// Wrap the implementation with arity validation and produce the final
    /// metadata record.
    pub fn build(self) -> Result<FunctionMetadata, RuntimeError> {
        let implementation =
            self.implementation
                .ok_or_else(|| RuntimeError::InvalidConfiguration {
                    name: self.name.clone(),
                    msg: "missing implementation".to_string(),
                })?;

        let name = self.name.clone();
        let arity = self.arity;
        let invoke: InvokeFn = Arc::new(move |args: &[Value]| {
            arity.check(&name, args.len())?;
            implementation(args)
        });

        Ok(FunctionMetadata {
            name: self.name,
            arity: self.arity,
            kind: self.kind,
            doc: self.doc,
            invoke,
        })
    }
}
