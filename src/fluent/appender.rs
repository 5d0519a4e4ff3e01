//! The appender type registered with the host framework.

use std::fmt;
use std::sync::Arc;

use log::warn;

use crate::appender::{AppendError, Appender};
use crate::log_record::LogRecord;
use crate::projector::project;
use crate::rate_limited_warner::RateLimitedWarner;
use crate::transport::Transport;

use super::builder::{Destination, FluentAppenderBuilder};

/// Appender forwarding records to a Fluentd collector.
///
/// Stateless per call: each record is projected into its wire shape and
/// handed to the transport under the destination tag. The appender never
/// retries or buffers; delivery semantics belong entirely to the
/// transport.
pub struct FluentAppender {
    destination: Destination,
    transport: Arc<dyn Transport>,
    warner: RateLimitedWarner,
}

impl FluentAppender {
    /// Start configuring an appender.
    pub fn builder() -> FluentAppenderBuilder {
        FluentAppenderBuilder::new()
    }

    pub(crate) fn with_transport(destination: Destination, transport: Arc<dyn Transport>) -> Self {
        Self {
            destination,
            transport,
            warner: RateLimitedWarner::default(),
        }
    }

    /// The validated destination this appender forwards to.
    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}

impl Appender for FluentAppender {
    fn append(&self, record: LogRecord) -> Result<(), AppendError> {
        let projected = project(&record);
        match self.transport.emit(self.destination.tag(), &projected) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.warner.record_drop();
                self.warner.warn_if_due(|count| {
                    warn!("FluentAppender could not forward records ({err}); dropped {count}");
                });
                Err(err.into())
            }
        }
    }

    fn flush(&self) -> bool {
        self.transport.flush()
    }
}

impl fmt::Debug for FluentAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentAppender")
            .field("destination", &self.destination)
            .finish()
    }
}
