//! Client-side transport to the remote collector.
//!
//! This module owns everything the appender itself must not: the socket,
//! serialisation into the Forward wire format, reconnection, and the
//! consumer thread draining the bounded queue. [`Transport`] is the seam
//! the appender talks through; [`ForwardTransport`] is the production
//! implementation speaking Fluentd's Forward protocol over TCP with
//! optional TLS.

mod config;
mod connection;
mod forward;
mod reconnect;
mod serialise;
mod worker;


pub use config::ForwardTransportConfig;
pub use connection::TlsOptions;
pub use forward::ForwardTransport;

use thiserror::Error;

use crate::projector::StructuredRecord;

/// Errors surfaced by [`Transport::emit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The bounded queue refused the record.
    #[error("transport queue is full")]
    QueueFull,
    /// The transport has shut down and accepts no further records.
    #[error("transport is closed")]
    Closed,
}

/// Capability to deliver a structured record to the collector under a tag.
///
/// Implementations must be safe for concurrent invocation; callers hand
/// over a record and do not consume any acknowledgement.
pub trait Transport: Send + Sync {
    /// Deliver `record` to the collector routed by `tag`.
    fn emit(&self, tag: &str, record: &StructuredRecord) -> Result<(), TransportError>;

    /// Flush records still queued. Returns `true` when the transport
    /// acknowledged within its own deadline.
    fn flush(&self) -> bool {
        true
    }
}
