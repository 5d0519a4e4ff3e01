//! Fluentd appender: record projection plus hand-off to the transport.
//!
//! [`FluentAppender`] is the piece that plugs into the host framework's
//! appender chain. Everything stateful lives elsewhere: the validated
//! [`Destination`] is immutable for the appender's lifetime, and delivery
//! belongs to the [`Transport`](crate::transport::Transport) it holds.

mod appender;
mod builder;

#[cfg(test)]
mod tests;

pub use appender::FluentAppender;
pub use builder::{BuildError, Destination, FluentAppenderBuilder};
