//! Log record representation handed to appenders.

use std::fmt;
use std::thread;

use crate::error_chain::ErrorInfo;
use crate::level::Level;

/// A single log event as delivered by the host logging framework.
///
/// Records are immutable once constructed and are not retained beyond the
/// `append` call that carries them.
#[derive(Clone, Debug)]
pub struct LogRecord {
    /// Name of the logger that produced the record.
    pub logger: String,
    /// Severity of the record.
    pub level: Level,
    /// Fully formatted message, placeholders already substituted.
    pub message: String,
    /// Name of the thread that emitted the record.
    pub thread_name: String,
    /// Head of the error cause chain, when the record carries one.
    pub error: Option<ErrorInfo>,
}

impl LogRecord {
    /// Construct a record from logger `name`, `level`, and `message`,
    /// capturing the calling thread's name.
    pub fn new(logger: &str, level: Level, message: &str) -> Self {
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            thread_name: current_thread_name(),
            error: None,
        }
    }

    /// Attach an error chain to the record.
    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    /// Override the captured thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Name of the current thread, falling back to its debug id for unnamed
/// threads so the `tid` field is never empty.
fn current_thread_name() -> String {
    let current = thread::current();
    match current.name() {
        Some(name) => name.to_owned(),
        None => format!("{:?}", current.id()),
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}
