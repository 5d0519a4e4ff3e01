//! Appender seam between the host logging framework and concrete sinks.

use thiserror::Error;

use crate::log_record::LogRecord;
use crate::transport::TransportError;

/// Errors surfaced by [`Appender::append`].
#[derive(Debug, Error)]
pub enum AppendError {
    /// The transport rejected or could not deliver the record.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Trait implemented by all appenders.
///
/// `Appender` is `Send + Sync` so the host framework may invoke `append`
/// concurrently from every log-emitting thread.
pub trait Appender: Send + Sync {
    /// Dispatch one record for emission.
    fn append(&self, record: LogRecord) -> Result<(), AppendError>;

    /// Flush any records still in flight. Returns `true` when the sink
    /// acknowledged the flush.
    fn flush(&self) -> bool {
        true
    }
}
