//! Projection of log records into the fixed wire shape.

use serde::Serialize;

use crate::error_chain::render_chain;
use crate::log_record::LogRecord;

/// The record shape handed to the transport.
///
/// Field declaration order is the key order of the serialised map, and the
/// four fields are the complete key set. Serialisers must encode structs
/// as maps for the collector to see the named keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StructuredRecord {
    /// Canonical level string (`"ERROR"`, `"INFO"`, ...).
    pub log_level: String,
    /// Name of the emitting thread.
    pub tid: String,
    /// Logger (source class) name.
    pub class: String,
    /// Formatted message, with the flattened error chain appended when the
    /// record carried one.
    pub message: String,
}

/// Project one log record into a [`StructuredRecord`].
///
/// Pure function of its input: no side effects, safe to call concurrently.
/// A record without an error chain projects its message untouched.
pub fn project(record: &LogRecord) -> StructuredRecord {
    let mut message = record.message.clone();
    if let Some(error) = &record.error {
        message.push('\n');
        message.push_str(&render_chain(error));
    }
    StructuredRecord {
        log_level: record.level.to_string(),
        tid: record.thread_name.clone(),
        class: record.logger.clone(),
        message,
    }
}
