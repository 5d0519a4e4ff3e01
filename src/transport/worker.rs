//! Consumer thread owning the collector connection.

use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use log::warn;

use crate::projector::StructuredRecord;
use crate::rate_limited_warner::RateLimitedWarner;

use super::config::ForwardTransportConfig;
use super::connection::{Connection, connect};
use super::reconnect::ReconnectDelay;
use super::serialise::encode_event;

/// Commands processed by the worker thread.
pub enum ForwardCommand {
    Event {
        tag: String,
        time: i64,
        record: StructuredRecord,
    },
    Flush(Sender<()>),
    Shutdown(Sender<()>),
}

pub fn spawn_worker(
    config: ForwardTransportConfig,
) -> (Sender<ForwardCommand>, thread::JoinHandle<()>) {
    let (tx, rx) = bounded(config.capacity);
    let handle = thread::spawn(move || Worker::new(config).run(rx));
    (tx, handle)
}

struct Worker {
    config: ForwardTransportConfig,
    connection: Option<Connection>,
    delay: ReconnectDelay,
    warner: RateLimitedWarner,
}

impl Worker {
    fn new(config: ForwardTransportConfig) -> Self {
        let delay = ReconnectDelay::new(config.reconnect_base, config.reconnect_cap);
        Self {
            config,
            connection: None,
            delay,
            warner: RateLimitedWarner::default(),
        }
    }

    fn run(mut self, rx: Receiver<ForwardCommand>) {
        while let Ok(command) = rx.recv() {
            match command {
                ForwardCommand::Event { tag, time, record } => {
                    self.handle_event(&tag, time, &record);
                }
                ForwardCommand::Flush(ack) => {
                    self.flush_connection();
                    let _ = ack.send(());
                }
                ForwardCommand::Shutdown(ack) => {
                    self.flush_connection();
                    let _ = ack.send(());
                    break;
                }
            }
        }
        self.warner.flush(|count| {
            warn!("ForwardTransport shut down with {count} dropped records");
        });
    }

    fn handle_event(&mut self, tag: &str, time: i64, record: &StructuredRecord) {
        let payload = match encode_event(tag, time, record) {
            Ok(payload) => payload,
            Err(err) => {
                self.drop_record(&format!("serialisation failed: {err}"));
                return;
            }
        };

        if !self.ensure_connection() {
            return;
        }

        let outcome = self
            .connection
            .as_mut()
            .map(|conn| conn.write_all(&payload).and_then(|()| conn.flush()));
        match outcome {
            Some(Ok(())) => self.delay.reset(),
            Some(Err(err)) => {
                // Records are not replayed after a failed write; the event
                // already left the queue and the collector never saw it.
                self.connection = None;
                self.drop_record(&format!("write failed: {err}"));
                thread::sleep(self.delay.next_delay());
            }
            None => self.drop_record("no active connection"),
        }
    }

    /// Establish the connection when absent. On failure the pending record
    /// is dropped and the worker sleeps out its reconnect delay.
    fn ensure_connection(&mut self) -> bool {
        if self.connection.is_some() {
            return true;
        }
        match connect(
            &self.config.host,
            self.config.port,
            self.config.tls.as_ref(),
            self.config.connect_timeout,
        ) {
            Ok(mut conn) => {
                let _ = conn.set_write_timeout(self.config.write_timeout);
                self.connection = Some(conn);
                true
            }
            Err(err) => {
                let target = format!("{}:{}", self.config.host, self.config.port);
                self.drop_record(&format!("connect to {target} failed: {err}"));
                thread::sleep(self.delay.next_delay());
                false
            }
        }
    }

    fn flush_connection(&mut self) {
        if let Some(conn) = self.connection.as_mut()
            && conn.flush().is_err()
        {
            self.connection = None;
        }
    }

    fn drop_record(&self, reason: &str) {
        self.warner.record_drop();
        self.warner.warn_if_due(|count| {
            warn!("ForwardTransport {reason}; dropped {count} records");
        });
    }
}
