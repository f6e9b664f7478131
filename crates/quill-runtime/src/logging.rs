//! Logging collaborator interface
//!
//! The registry never writes to a log backend directly. It emits through a
//! [`LogSink`], which defaults to [`ServerLog`] (the `log` facade). Tests
//! substitute a recording sink to observe builtin output and redefinition
//! warnings.

use std::fmt;

/// Message severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
}

impl Severity {
    /// Every supported level, least severe first. One log builtin is seeded
    /// per entry on registry reset.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// The `log` facade has no notice level; `Notice` downmaps to info.
    fn log_level(self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info | Severity::Notice => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Destination for registry and builtin log output.
pub trait LogSink: Send + Sync {
    fn emit(&self, severity: Severity, message: &str);
}

/// Default sink: forwards to the `log` facade under the `quill::server`
/// target.
#[derive(Debug, Default)]
pub struct ServerLog;

impl LogSink for ServerLog {
    fn emit(&self, severity: Severity, message: &str) {
        log::log!(target: "quill::server", severity.log_level(), "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_names() {
        let names: Vec<&str> = Severity::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["debug", "info", "notice", "warning", "error"]);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Notice);
        assert!(Severity::Notice < Severity::Error);
    }

    #[test]
    fn test_notice_downmaps_to_info() {
        assert_eq!(Severity::Notice.log_level(), log::Level::Info);
        assert_eq!(Severity::Warning.log_level(), log::Level::Warn);
    }
}
