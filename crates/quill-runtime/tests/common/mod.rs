//! Shared test utilities
//!
//! Recording/counting collaborator stubs used across the integration
//! suites: a log sink that captures emitted lines and an autoload gateway
//! that counts calls and serves definitions from a fixed catalog.

// Not every suite uses every helper.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use quill_runtime::{
    Autoloader, Environment, FunctionBuilder, FunctionRegistry, LogSink, Severity, Value,
};

/// Log sink that records every emitted line.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn at_level(&self, severity: Severity) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, severity: Severity, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

/// Autoload gateway stub: counts every call and registers a zero-argument
/// rvalue for each name in its catalog, once.
#[derive(Default)]
pub struct StubGateway {
    catalog: Vec<String>,
    loads: AtomicUsize,
    bulk_loads: AtomicUsize,
    loaded: Mutex<HashSet<String>>,
}

impl StubGateway {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn providing(names: &[&str]) -> Self {
        Self {
            catalog: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn load_calls(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn bulk_load_calls(&self) -> usize {
        self.bulk_loads.load(Ordering::SeqCst)
    }

    fn register(&self, registry: &FunctionRegistry, name: &str, env: &Environment) {
        let marker = format!("loaded:{}", name);
        registry
            .define(
                env,
                FunctionBuilder::new(name)
                    .rvalue()
                    .doc(format!("Autoloaded definition of {}.", name))
                    .implementation(move |_| Ok(Value::string(marker.clone()))),
            )
            .unwrap();
    }
}

impl Autoloader for StubGateway {
    fn load(&self, registry: &FunctionRegistry, name: &str, env: &Environment) -> bool {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.catalog.iter().any(|n| n == name) {
            return false;
        }
        let mut loaded = self.loaded.lock().unwrap();
        if !loaded.insert(name.to_string()) {
            return false;
        }
        self.register(registry, name, env);
        true
    }

    fn load_all(&self, registry: &FunctionRegistry, env: &Environment) {
        self.bulk_loads.fetch_add(1, Ordering::SeqCst);
        let mut loaded = self.loaded.lock().unwrap();
        for name in &self.catalog {
            if loaded.insert(name.clone()) {
                self.register(registry, name, env);
            }
        }
    }
}
