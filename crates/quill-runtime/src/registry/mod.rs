//! Environment-scoped function registration and dispatch
//!
//! The registry owns one function table per environment plus a root table
//! holding environment-independent definitions. Lookup resolves against the
//! merged view (root overlaid by the current environment, environment wins
//! on collision) and falls back to the autoload gateway exactly once on a
//! miss. Redefinition is allowed: last write wins, with a warning through
//! the log sink.

mod autoload;
mod builtins;
mod function;
mod table;

pub use autoload::{Autoloader, NoAutoload};
pub use function::{Arity, FunctionBuilder, FunctionKind, FunctionMetadata, InvokeFn};
pub use table::FunctionTable;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::environment::Environment;
use crate::logging::{LogSink, ServerLog, Severity};
use crate::value::{RuntimeError, Value};

/// Thread-safe registry of callable DSL functions.
pub struct FunctionRegistry {
    root: Arc<FunctionTable>,
    environments: RwLock<HashMap<Environment, Arc<FunctionTable>>>,
    autoloader: Arc<dyn Autoloader>,
    sink: Arc<dyn LogSink>,
}

impl FunctionRegistry {
    /// Registry with no autoload gateway and the default server log sink,
    /// seeded with the log builtins.
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(NoAutoload), Arc::new(ServerLog))
    }

    /// Registry with explicit collaborators, seeded with the log builtins.
    pub fn with_collaborators(autoloader: Arc<dyn Autoloader>, sink: Arc<dyn LogSink>) -> Self {
        let registry = Self {
            root: Arc::new(FunctionTable::new()),
            environments: RwLock::new(HashMap::new()),
            autoloader,
            sink,
        };
        builtins::install(&registry);
        registry
    }

    /// Swap the autoload gateway. Takes `&mut self`: collaborators are
    /// wired up before the registry is shared.
    pub fn set_autoloader(&mut self, autoloader: Arc<dyn Autoloader>) {
        self.autoloader = autoloader;
    }

    /// Discard every table and the environment cache, then re-seed the log
    /// builtins. Callers serialize this against concurrent registry use.
    pub fn reset(&self) {
        self.environments.write().unwrap().clear();
        self.root.clear();
        builtins::install(self);
    }

    /// Register a function in `env`'s table.
    ///
    /// Builds the invocation wrapper first; a bad definition aborts with
    /// `InvalidConfiguration` and registers nothing. If the name is already
    /// visible in the merged view the previous entry is overwritten and a
    /// warning is emitted.
    pub fn define(
        &self,
        env: &Environment,
        builder: FunctionBuilder,
    ) -> Result<FunctionMetadata, RuntimeError> {
        let name = builder.name_ref().to_string();
        let meta = builder.build()?;
        if self.merged_get(env, &name).is_some() {
            self.sink.emit(
                Severity::Warning,
                &format!("redefining function '{}' in environment '{}'", name, env),
            );
        }
        self.table_for(env).insert(meta.clone());
        Ok(meta)
    }

    /// Register an rvalue function with a fixed argument count.
    pub fn register_function<F>(
        &self,
        env: &Environment,
        name: &str,
        arity: usize,
        implementation: F,
    ) -> Result<FunctionMetadata, RuntimeError>
    where
        F: Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        self.define(
            env,
            FunctionBuilder::new(name)
                .arity(Arity::Exact(arity))
                .rvalue()
                .implementation(implementation),
        )
    }

    /// Register an rvalue function accepting any number of arguments.
    pub fn register_variadic<F>(
        &self,
        env: &Environment,
        name: &str,
        implementation: F,
    ) -> Result<FunctionMetadata, RuntimeError>
    where
        F: Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        self.define(
            env,
            FunctionBuilder::new(name)
                .arity(Arity::AtLeast(0))
                .rvalue()
                .implementation(implementation),
        )
    }

    /// Resolve an invocation handle for `name` against the merged view.
    ///
    /// On a miss the autoload gateway gets exactly one attempt (outside all
    /// table locks), after which the merged view is consulted once more.
    /// `None` is the ordinary not-found outcome, not an error.
    pub fn lookup(&self, env: &Environment, name: &str) -> Option<FunctionMetadata> {
        if let Some(meta) = self.merged_get(env, name) {
            return Some(meta);
        }
        self.autoloader.load(self, name, env);
        self.merged_get(env, name)
    }

    /// Whether the currently registered `name` is an rvalue. Never
    /// autoloads; unknown names are not rvalues. Used for cheap static
    /// classification during parsing.
    pub fn is_rvalue(&self, env: &Environment, name: &str) -> bool {
        self.merged_get(env, name)
            .map(|meta| meta.is_rvalue())
            .unwrap_or(false)
    }

    /// Declared arity of the currently registered `name`, in integer form,
    /// or -1 when unknown. Never autoloads.
    pub fn arity(&self, env: &Environment, name: &str) -> i32 {
        self.merged_get(env, name)
            .map(|meta| meta.arity().declared())
            .unwrap_or(-1)
    }

    /// Sorted names of every function visible from `env`.
    pub fn names(&self, env: &Environment) -> Vec<String> {
        let mut names: Vec<String> = self.merged_snapshot(env).into_keys().collect();
        names.sort();
        names
    }

    /// Text report of every function visible from `env`, lexicographically
    /// ordered. Forces the gateway to load all available definitions first.
    pub fn documentation(&self, env: &Environment) -> String {
        self.autoloader.load_all(self, env);

        let merged = self.merged_snapshot(env);
        let mut names: Vec<&String> = merged.keys().collect();
        names.sort();

        let mut out = String::new();
        for name in names {
            let meta = &merged[name.as_str()];
            out.push_str(name);
            out.push('\n');
            out.push_str(&"-".repeat(name.len()));
            out.push('\n');
            match meta.doc() {
                Some(doc) => {
                    out.push_str(doc);
                    if !doc.ends_with('\n') {
                        out.push('\n');
                    }
                }
                None => out.push_str("Undocumented.\n"),
            }
            out.push('\n');
            out.push_str("- Type: ");
            out.push_str(meta.kind().name());
            out.push_str("\n\n\n");
        }
        out
    }

    pub(crate) fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Table backing `env`, created on first reference.
    fn table_for(&self, env: &Environment) -> Arc<FunctionTable> {
        if env.is_root() {
            return Arc::clone(&self.root);
        }
        if let Some(table) = self.environments.read().unwrap().get(env) {
            return Arc::clone(table);
        }
        let mut environments = self.environments.write().unwrap();
        Arc::clone(
            environments
                .entry(env.clone())
                .or_insert_with(|| Arc::new(FunctionTable::new())),
        )
    }

    /// Table backing `env` if one exists; root is handled separately.
    fn existing_table(&self, env: &Environment) -> Option<Arc<FunctionTable>> {
        if env.is_root() {
            return None;
        }
        self.environments.read().unwrap().get(env).cloned()
    }

    /// Single entry of the merged view, computed under a combined critical
    /// section: the root guard is held while the environment table is
    /// consulted, so no concurrent define interleaves mid-merge.
    fn merged_get(&self, env: &Environment, name: &str) -> Option<FunctionMetadata> {
        let env_table = self.existing_table(env);
        let root_guard = self.root.read_guard();
        let env_guard = env_table.as_ref().map(|table| table.read_guard());
        if let Some(guard) = &env_guard {
            if let Some(meta) = guard.get(name) {
                return Some(meta.clone());
            }
        }
        root_guard.get(name).cloned()
    }

    /// Full merged view, root overlaid by `env`, under the same combined
    /// critical section as [`FunctionRegistry::merged_get`].
    fn merged_snapshot(&self, env: &Environment) -> HashMap<String, FunctionMetadata> {
        let env_table = self.existing_table(env);
        let root_guard = self.root.read_guard();
        let env_guard = env_table.as_ref().map(|table| table.read_guard());

        let mut merged: HashMap<String, FunctionMetadata> = root_guard
            .iter()
            .map(|(name, meta)| (name.clone(), meta.clone()))
            .collect();
        if let Some(guard) = &env_guard {
            for (name, meta) in guard.iter() {
                merged.insert(name.clone(), meta.clone());
            }
        }
        merged
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
