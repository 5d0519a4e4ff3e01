//! Tests for the appender and its builder.

use std::sync::Arc;

use rstest::rstest;

use crate::appender::{AppendError, Appender};
use crate::error_chain::{ErrorInfo, StackFrame};
use crate::level::Level;
use crate::log_record::LogRecord;
use crate::test_utils::{CollectingTransport, RefusingTransport};
use crate::transport::{Transport, TransportError};

use super::{BuildError, FluentAppender, FluentAppenderBuilder};

fn valid_builder() -> FluentAppenderBuilder {
    FluentAppender::builder()
        .with_tag("app.web")
        .with_host("fluentd.internal")
        .with_port(24224)
}

fn collecting_appender() -> (Arc<CollectingTransport>, FluentAppender) {
    let transport = Arc::new(CollectingTransport::new());
    let appender = valid_builder()
        .build_with_transport(transport.clone())
        .expect("build appender");
    (transport, appender)
}

#[rstest]
fn builder_requires_a_tag() {
    let err = FluentAppender::builder()
        .with_host("localhost")
        .with_port(24224)
        .build()
        .expect_err("tag must be required");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("tag")));
}

#[rstest]
fn builder_requires_a_host() {
    let err = FluentAppender::builder()
        .with_tag("app")
        .with_port(24224)
        .build()
        .expect_err("host must be required");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("host")));
}

#[rstest]
fn builder_requires_a_port() {
    let err = FluentAppender::builder()
        .with_tag("app")
        .with_host("localhost")
        .build()
        .expect_err("port must be required");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("port")));
}

#[rstest]
#[case("")]
fn builder_rejects_empty_tag(#[case] tag: &str) {
    let err = FluentAppender::builder()
        .with_tag(tag)
        .with_host("localhost")
        .with_port(24224)
        .build()
        .expect_err("empty tag must fail");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("tag")));
}

#[rstest]
fn builder_rejects_port_zero() {
    let err = FluentAppender::builder()
        .with_tag("app")
        .with_host("localhost")
        .with_port(0)
        .build()
        .expect_err("port zero must fail");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("port")));
}

#[rstest]
fn builder_rejects_zero_capacity() {
    let err = valid_builder()
        .with_capacity(0)
        .build()
        .expect_err("zero capacity must fail");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("capacity")));
}

#[rstest]
fn failed_validation_creates_no_transport_handle() {
    let transport: Arc<dyn Transport> = Arc::new(CollectingTransport::new());
    let probe = Arc::clone(&transport);

    let result = FluentAppender::builder()
        .with_tag("app")
        .with_port(24224)
        .build_with_transport(transport);

    assert!(result.is_err());
    // Nothing retained the transport: the appender was never constructed.
    assert_eq!(Arc::strong_count(&probe), 1);
}

#[rstest]
fn build_exposes_the_validated_destination() {
    let (_, appender) = collecting_appender();
    let destination = appender.destination();
    assert_eq!(destination.tag(), "app.web");
    assert_eq!(destination.host(), "fluentd.internal");
    assert_eq!(destination.port(), 24224);
}

#[rstest]
fn append_forwards_under_the_destination_tag() {
    let (transport, appender) = collecting_appender();

    appender
        .append(LogRecord::new("com.app.Service", Level::Info, "hello"))
        .expect("append record");

    let emitted = transport.emitted();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, "app.web");
    assert_eq!(emitted[0].1.message, "hello");
    assert_eq!(emitted[0].1.class, "com.app.Service");
}

#[rstest]
fn append_projects_the_error_chain_into_the_message() {
    let (transport, appender) = collecting_appender();

    let record = LogRecord::new("com.app.Service", Level::Error, "failed")
        .with_thread_name("main")
        .with_error(
            ErrorInfo::new("java.lang.RuntimeException")
                .with_message("boom")
                .with_frames(vec![StackFrame::new("A.run", "A.java", 10)]),
        );
    appender.append(record).expect("append record");

    let emitted = transport.emitted();
    assert_eq!(emitted[0].1.log_level, "ERROR");
    assert_eq!(emitted[0].1.tid, "main");
    assert_eq!(
        emitted[0].1.message,
        "failed\njava.lang.RuntimeException: boom at A.run(A.java:10)"
    );
}

#[rstest]
fn append_surfaces_transport_failures() {
    let transport = Arc::new(RefusingTransport::new(TransportError::QueueFull));
    let appender = valid_builder()
        .build_with_transport(transport)
        .expect("build appender");

    let err = appender
        .append(LogRecord::new("app", Level::Info, "lost"))
        .expect_err("failure must propagate");
    assert!(matches!(
        err,
        AppendError::Transport(TransportError::QueueFull)
    ));
}

#[rstest]
fn flush_delegates_to_the_transport() {
    let (transport, appender) = collecting_appender();
    assert!(appender.flush());
    assert_eq!(transport.flushes(), 1);
}

#[rstest]
fn appender_is_shareable_across_threads() {
    let (transport, appender) = collecting_appender();
    let appender = Arc::new(appender);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let appender = Arc::clone(&appender);
            std::thread::spawn(move || {
                appender
                    .append(LogRecord::new("app", Level::Info, &format!("msg {i}")))
                    .expect("append record");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join emitter");
    }

    assert_eq!(transport.emitted().len(), 4);
}
