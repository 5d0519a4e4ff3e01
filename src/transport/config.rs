//! Configuration consumed by the forward transport.

use std::time::Duration;

use super::connection::TlsOptions;

/// Default bounded queue capacity between appender threads and the worker.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
/// Default timeout for establishing the collector connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default timeout applied to socket writes.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);
/// Default deadline for flush and shutdown acknowledgements.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);
/// Default base delay between reconnection attempts.
pub const DEFAULT_RECONNECT_BASE: Duration = Duration::from_millis(100);
/// Default ceiling for the reconnection delay window.
pub const DEFAULT_RECONNECT_CAP: Duration = Duration::from_secs(10);

/// Configuration for a [`ForwardTransport`](super::ForwardTransport).
#[derive(Clone, Debug)]
pub struct ForwardTransportConfig {
    /// Collector hostname or IP address.
    pub host: String,
    /// Collector TCP port.
    pub port: u16,
    /// Namespace joined in front of every per-call tag (`namespace.tag`).
    /// Empty by default, leaving the per-call tag untouched.
    pub namespace: String,
    /// Bounded queue capacity.
    pub capacity: usize,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub flush_timeout: Duration,
    pub reconnect_base: Duration,
    pub reconnect_cap: Duration,
    /// TLS options for collectors behind TLS; plain TCP when absent.
    pub tls: Option<TlsOptions>,
}

impl ForwardTransportConfig {
    /// Configuration targeting `host:port` with defaults everywhere else.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            namespace: String::new(),
            capacity: DEFAULT_CHANNEL_CAPACITY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            reconnect_base: DEFAULT_RECONNECT_BASE,
            reconnect_cap: DEFAULT_RECONNECT_CAP,
            tls: None,
        }
    }

    /// Override the tag namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Override the queue capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable TLS towards the collector.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = Some(tls);
        self
    }
}
