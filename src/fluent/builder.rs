//! Builder and destination validation for the Fluentd appender.

use std::sync::Arc;

use thiserror::Error;

use crate::transport::{ForwardTransport, ForwardTransportConfig, TlsOptions, Transport};

use super::FluentAppender;

/// Errors raised while building a [`FluentAppender`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid appender configuration: {0}")]
    InvalidConfig(String),
}

/// Validated, immutable forwarding target.
///
/// Only the builder constructs these, so holding a `Destination` proves
/// the tag and host are non-empty and the port is in `1..=65535`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    tag: String,
    host: String,
    port: u16,
}

impl Destination {
    /// Routing tag attached to every forwarded record.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Collector hostname.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Collector port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// Builder for [`FluentAppender`] instances.
///
/// Tag, host, and port are all required; `build` refuses to construct the
/// appender, and therefore to create any transport handle, until all
/// three validate.
#[derive(Clone, Debug, Default)]
pub struct FluentAppenderBuilder {
    tag: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    capacity: Option<usize>,
    tls: Option<TlsOptions>,
}

impl FluentAppenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routing tag under which records reach the collector.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Collector hostname.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Collector port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Override the transport queue capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Enable TLS towards the collector.
    #[must_use]
    pub fn with_tls(mut self, domain: impl Into<String>, insecure_skip_verify: bool) -> Self {
        self.tls = Some(TlsOptions {
            domain: domain.into(),
            insecure_skip_verify,
        });
        self
    }

    fn validate(&self) -> Result<Destination, BuildError> {
        let tag = require_non_empty("tag", self.tag.as_deref())?;
        let host = require_non_empty("host", self.host.as_deref())?;
        let port = self
            .port
            .ok_or_else(|| BuildError::InvalidConfig("port must be set".into()))?;
        if port == 0 {
            return Err(BuildError::InvalidConfig(
                "port must be in 1..=65535".into(),
            ));
        }
        if let Some(capacity) = self.capacity
            && capacity == 0
        {
            return Err(BuildError::InvalidConfig(
                "capacity must be non-zero".into(),
            ));
        }
        Ok(Destination { tag, host, port })
    }

    /// Validate the destination and spawn the forward transport.
    ///
    /// The transport is created with an empty namespace; the destination
    /// tag travels with each record at send time.
    pub fn build(self) -> Result<FluentAppender, BuildError> {
        let destination = self.validate()?;
        let mut config = ForwardTransportConfig::new(destination.host(), destination.port());
        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        if let Some(tls) = self.tls {
            config = config.with_tls(tls);
        }
        let transport = Arc::new(ForwardTransport::new(config));
        Ok(FluentAppender::with_transport(destination, transport))
    }

    /// Validate the destination and attach a caller-supplied transport.
    ///
    /// Transport tuning options on the builder (capacity, TLS) are ignored
    /// here; they only apply to the transport `build` spawns itself.
    pub fn build_with_transport(
        self,
        transport: Arc<dyn Transport>,
    ) -> Result<FluentAppender, BuildError> {
        let destination = self.validate()?;
        Ok(FluentAppender::with_transport(destination, transport))
    }
}

fn require_non_empty(field: &str, value: Option<&str>) -> Result<String, BuildError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.to_owned()),
        Some(_) => Err(BuildError::InvalidConfig(format!(
            "{field} must be non-empty"
        ))),
        None => Err(BuildError::InvalidConfig(format!("{field} must be set"))),
    }
}
