//! Forward log records from a host logging framework to a Fluentd
//! collector.
//!
//! The crate plugs into an appender chain: the host framework drives
//! [`Appender::append`] with fully formatted [`LogRecord`]s, and
//! [`FluentAppender`] projects each one into the fixed four-key record
//! shape (`log_level`, `tid`, `class`, `message`) before handing it to a
//! [`Transport`](transport::Transport). Records carrying an error get the
//! flattened cause chain appended to their message.
//!
//! Delivery is owned by the transport layer: [`ForwardTransport`] speaks
//! Fluentd's Forward protocol (MessagePack events over TCP, optionally
//! TLS) behind a bounded queue and a consumer thread, so `append` never
//! blocks on the network.
//!
//! ```no_run
//! use fluent_appender::{Appender, FluentAppender, Level, LogRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let appender = FluentAppender::builder()
//!     .with_tag("app.web")
//!     .with_host("fluentd.internal")
//!     .with_port(24224)
//!     .build()?;
//!
//! appender.append(LogRecord::new("com.app.Service", Level::Info, "started"))?;
//! # Ok(())
//! # }
//! ```

mod appender;
mod error_chain;
mod fluent;
mod level;
mod log_record;
mod projector;
mod rate_limited_warner;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use appender::{AppendError, Appender};
pub use error_chain::{ErrorInfo, MAX_CAUSE_DEPTH, StackFrame, TRUNCATION_MARKER, render_chain};
pub use fluent::{BuildError, Destination, FluentAppender, FluentAppenderBuilder};
pub use level::Level;
pub use log_record::LogRecord;
pub use projector::{StructuredRecord, project};
pub use transport::{ForwardTransport, ForwardTransportConfig, TlsOptions};
