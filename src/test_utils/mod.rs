//! Shared test doubles.

mod collecting_transport;

pub use collecting_transport::{CollectingTransport, RefusingTransport};
