//! Problems reported while generating a material.

use std::fmt;

/// Severity of a [`GenerationLogEntry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Warning,
    Error,
}

/// A single problem reported during generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationLogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Problems accumulated over one generation run. Material data problems are
/// recorded here instead of aborting the run, so a single run can report
/// several of them.
///
/// Every entry is also forwarded to the [`log`] facade.
#[derive(Clone, Debug, Default)]
pub struct GenerationLog {
    entries: Vec<GenerationLogEntry>,
}

impl GenerationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.entries.push(GenerationLogEntry {
            level: LogLevel::Warning,
            message,
        });
    }

    /// Records an error.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");
        self.entries.push(GenerationLogEntry {
            level: LogLevel::Error,
            message,
        });
    }

    /// Whether any errors were recorded.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.level == LogLevel::Error)
    }

    /// Whether any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.level == LogLevel::Warning)
    }

    pub fn entries(&self) -> &[GenerationLogEntry] {
        &self.entries
    }

    /// Returns an iterator over the messages of the recorded errors.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.messages(LogLevel::Error)
    }

    /// Returns an iterator over the messages of the recorded warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.messages(LogLevel::Warning)
    }

    fn messages(&self, level: LogLevel) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |entry| entry.level == level)
            .map(|entry| entry.message.as_str())
    }
}

impl fmt::Display for GenerationLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Warning => write!(f, "warning: {}", self.message),
            LogLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_log_has_no_problems() {
        let log = GenerationLog::new();
        assert!(!log.has_errors());
        assert!(!log.has_warnings());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut log = GenerationLog::new();
        log.warning("Tessellation is ignored");
        assert!(log.has_warnings());
        assert!(!log.has_errors());
    }

    #[test]
    fn errors_are_reported_in_order() {
        let mut log = GenerationLog::new();
        log.error("first");
        log.warning("between");
        log.error("second");
        assert_eq!(log.errors().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(log.entries()[1].to_string(), "warning: between");
    }
}
