//! Named execution environments
//!
//! An environment is an opaque identity with a stable name, used as the key
//! for per-environment function tables. The registry takes the environment
//! explicitly on every call; resolution of the "current" environment is the
//! caller's concern.

use std::fmt;
use std::sync::Arc;

/// Cheap-to-clone handle naming an execution environment.
///
/// The distinguished root environment holds definitions visible from every
/// other environment (the fallback layer of the merged lookup view).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Environment(Arc<str>);

impl Environment {
    /// Reserved name of the root environment.
    pub const ROOT_NAME: &'static str = "*root*";

    pub fn new(name: impl AsRef<str>) -> Self {
        Environment(Arc::from(name.as_ref()))
    }

    pub fn root() -> Self {
        Environment(Arc::from(Self::ROOT_NAME))
    }

    pub fn is_root(&self) -> bool {
        &*self.0 == Self::ROOT_NAME
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Environment::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_default() {
        assert!(Environment::default().is_root());
        assert_eq!(Environment::default(), Environment::root());
    }

    #[test]
    fn test_named_environment() {
        let env = Environment::new("production");
        assert!(!env.is_root());
        assert_eq!(env.name(), "production");
        assert_eq!(env, Environment::from("production"));
    }
}
