//! Transport handle speaking the Fluentd Forward protocol.

use std::fmt;
use std::thread;
use std::time::Duration;

use crossbeam_channel::TrySendError;
use log::warn;
use parking_lot::Mutex;

use crate::projector::StructuredRecord;
use crate::rate_limited_warner::RateLimitedWarner;

use super::config::ForwardTransportConfig;
use super::worker::{ForwardCommand, spawn_worker};
use super::{Transport, TransportError};

/// Forwards records to a Fluentd collector as Forward Message-mode events.
///
/// Construction spawns the consumer thread; the connection itself is
/// established lazily when the first event arrives. `emit` never blocks
/// beyond queue admission, and a full or closed queue is reported to the
/// caller instead of stalling the log-emitting thread.
pub struct ForwardTransport {
    tx: Option<crossbeam_channel::Sender<ForwardCommand>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    warner: RateLimitedWarner,
    flush_timeout: Duration,
    namespace: String,
}

impl ForwardTransport {
    /// Spawn a transport from its configuration.
    pub fn new(config: ForwardTransportConfig) -> Self {
        let flush_timeout = config.flush_timeout;
        let namespace = config.namespace.clone();
        let (tx, handle) = spawn_worker(config);
        Self {
            tx: Some(tx),
            handle: Mutex::new(Some(handle)),
            warner: RateLimitedWarner::default(),
            flush_timeout,
            namespace,
        }
    }

    /// Join the configured namespace with a per-call tag.
    fn full_tag(&self, tag: &str) -> String {
        if self.namespace.is_empty() {
            tag.to_owned()
        } else {
            format!("{}.{}", self.namespace, tag)
        }
    }

    /// Shut the worker down and wait for it to exit.
    pub fn close(&mut self) {
        self.request_shutdown();
        self.join_worker();
    }

    fn request_shutdown(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if tx.send(ForwardCommand::Shutdown(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.recv_timeout(self.flush_timeout);
    }

    fn join_worker(&mut self) {
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("ForwardTransport: worker thread panicked");
        }
    }
}

impl Transport for ForwardTransport {
    fn emit(&self, tag: &str, record: &StructuredRecord) -> Result<(), TransportError> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(TransportError::Closed);
        };
        let command = ForwardCommand::Event {
            tag: self.full_tag(tag),
            time: chrono::Utc::now().timestamp(),
            record: record.clone(),
        };
        match tx.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.warner.record_drop();
                self.warner.warn_if_due(|count| {
                    warn!("ForwardTransport queue full; dropped {count} records");
                });
                Err(TransportError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => {
                self.warner.record_drop();
                self.warner.warn_if_due(|count| {
                    warn!("ForwardTransport worker gone; dropped {count} records");
                });
                Err(TransportError::Closed)
            }
        }
    }

    fn flush(&self) -> bool {
        let Some(tx) = self.tx.as_ref() else {
            return false;
        };
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if tx
            .send_timeout(ForwardCommand::Flush(ack_tx), self.flush_timeout)
            .is_err()
        {
            return false;
        }
        ack_rx.recv_timeout(self.flush_timeout).is_ok()
    }
}

impl Drop for ForwardTransport {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for ForwardTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardTransport")
            .field("namespace", &self.namespace)
            .field("flush_timeout", &self.flush_timeout)
            .finish()
    }
}
