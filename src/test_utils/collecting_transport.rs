//! Transport doubles for exercising appenders without a collector.

use parking_lot::Mutex;

use crate::projector::StructuredRecord;
use crate::transport::{Transport, TransportError};

/// Transport that records every emitted `(tag, record)` pair.
#[derive(Default)]
pub struct CollectingTransport {
    emitted: Mutex<Vec<(String, StructuredRecord)>>,
    flushes: Mutex<u32>,
}

impl CollectingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in emission order.
    pub fn emitted(&self) -> Vec<(String, StructuredRecord)> {
        self.emitted.lock().clone()
    }

    /// Number of flush calls observed.
    pub fn flushes(&self) -> u32 {
        *self.flushes.lock()
    }
}

impl Transport for CollectingTransport {
    fn emit(&self, tag: &str, record: &StructuredRecord) -> Result<(), TransportError> {
        self.emitted.lock().push((tag.to_owned(), record.clone()));
        Ok(())
    }

    fn flush(&self) -> bool {
        *self.flushes.lock() += 1;
        true
    }
}

/// Transport that refuses every record with the configured error.
pub struct RefusingTransport {
    error: TransportError,
}

impl RefusingTransport {
    pub fn new(error: TransportError) -> Self {
        Self { error }
    }
}

impl Transport for RefusingTransport {
    fn emit(&self, _tag: &str, _record: &StructuredRecord) -> Result<(), TransportError> {
        Err(self.error)
    }

    fn flush(&self) -> bool {
        false
    }
}
