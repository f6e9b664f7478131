//! On-demand loading of function definitions
//!
//! The registry does no discovery or IO itself. When a lookup misses, it
//! hands the name to an [`Autoloader`], which may locate a definition
//! source, execute it, and call back into [`FunctionRegistry::define`].
//! The registry never holds a table lock across either gateway call, so
//! re-entrant defines are safe.

use crate::environment::Environment;

use super::FunctionRegistry;

/// Gateway that locates and registers missing function definitions.
pub trait Autoloader: Send + Sync {
    /// Try to make `name` available in `env`, registering it through
    /// `registry` on success. Returns whether a new definition became
    /// available. Must be idempotent: a second call for an already-loaded
    /// name is a no-op returning false.
    fn load(&self, registry: &FunctionRegistry, name: &str, env: &Environment) -> bool;

    /// Best-effort bulk load of every definition visible from `env`. Used
    /// by documentation generation only.
    fn load_all(&self, registry: &FunctionRegistry, env: &Environment) {
        let _ = (registry, env);
    }
}

/// Inert gateway used when no loader is configured.
#[derive(Debug, Default)]
pub struct NoAutoload;

impl Autoloader for NoAutoload {
    fn load(&self, _registry: &FunctionRegistry, _name: &str, _env: &Environment) -> bool {
        false
    }
}
