//! Error chain representation and flattening.
//!
//! The host framework attaches at most one [`ErrorInfo`] to a record, the
//! head of a singly-linked causal chain. [`render_chain`] flattens that
//! chain into the human-readable form the collector side expects:
//!
//! ```text
//! TypeName: message frame1
//! frame2
//! Caused by: OtherType: other message frame
//! ```

use std::fmt;

/// Upper bound on the number of chain nodes rendered by [`render_chain`].
///
/// The host framework only ever produces finite chains, but a cyclic or
/// pathologically deep chain must not exhaust the stack or the output
/// buffer. Nodes beyond this depth are replaced by a truncation marker.
pub const MAX_CAUSE_DEPTH: usize = 32;

/// Marker appended in place of cause levels beyond [`MAX_CAUSE_DEPTH`].
pub const TRUNCATION_MARKER: &str = "... (cause chain truncated)";

/// One stack frame of an error, rendered as `at function(file:line)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackFrame {
    /// Fully qualified function or method name.
    pub function: String,
    /// Source file name.
    pub file: String,
    /// Line number in the source file.
    pub line: u32,
}

impl StackFrame {
    /// Create a frame from its three components.
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}({}:{})", self.function, self.file, self.line)
    }
}

/// A node in an error cause chain.
///
/// `cause` is a forward-only traversal link; chains produced by the host
/// framework are strictly linear and finite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Error type name (e.g. `java.lang.RuntimeException`).
    pub type_name: String,
    /// Optional error message.
    pub message: Option<String>,
    /// Stack frames from innermost to outermost.
    pub frames: Vec<StackFrame>,
    /// The underlying error that triggered this one, if any.
    pub cause: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    /// Create an error node with only a type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Attach a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach stack frames.
    #[must_use]
    pub fn with_frames(mut self, frames: Vec<StackFrame>) -> Self {
        self.frames = frames;
        self
    }

    /// Link the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: ErrorInfo) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

/// Flatten a cause chain into a single string.
///
/// Each node renders as `type_name[": " message] " " frames.join("\n")`;
/// nodes after the first are prefixed with `"\nCaused by: "`. Traversal is
/// iterative and stops at [`MAX_CAUSE_DEPTH`], substituting
/// [`TRUNCATION_MARKER`] for whatever remains.
///
/// A node without frames keeps the separating space after its header; the
/// collector side has parsed that exact shape since the first deployment.
pub fn render_chain(head: &ErrorInfo) -> String {
    let mut out = String::new();
    let mut node = Some(head);
    let mut depth = 0usize;
    while let Some(error) = node {
        if depth > 0 {
            out.push_str("\nCaused by: ");
        }
        if depth >= MAX_CAUSE_DEPTH {
            out.push_str(TRUNCATION_MARKER);
            break;
        }
        render_node(error, &mut out);
        node = error.cause.as_deref();
        depth += 1;
    }
    out
}

fn render_node(error: &ErrorInfo, out: &mut String) {
    out.push_str(&error.type_name);
    if let Some(message) = &error.message {
        out.push_str(": ");
        out.push_str(message);
    }
    out.push(' ');
    let frames = error
        .frames
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&frames);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn boom() -> ErrorInfo {
        ErrorInfo::new("java.lang.RuntimeException")
            .with_message("boom")
            .with_frames(vec![StackFrame::new("A.run", "A.java", 10)])
    }

    #[rstest]
    fn renders_single_level_without_cause_suffix() {
        let rendered = render_chain(&boom());
        assert_eq!(rendered, "java.lang.RuntimeException: boom at A.run(A.java:10)");
        assert!(!rendered.contains("Caused by"));
    }

    #[rstest]
    fn omits_message_separator_when_message_absent() {
        let error = ErrorInfo::new("java.io.IOException")
            .with_frames(vec![StackFrame::new("B.read", "B.java", 3)]);
        assert_eq!(render_chain(&error), "java.io.IOException at B.read(B.java:3)");
    }

    #[rstest]
    fn keeps_trailing_space_when_frames_empty() {
        let error = ErrorInfo::new("java.lang.Error").with_message("bare");
        assert_eq!(render_chain(&error), "java.lang.Error: bare ");
    }

    #[rstest]
    fn joins_multiple_frames_with_newlines() {
        let error = ErrorInfo::new("E").with_frames(vec![
            StackFrame::new("A.run", "A.java", 1),
            StackFrame::new("B.call", "B.java", 2),
        ]);
        assert_eq!(render_chain(&error), "E at A.run(A.java:1)\nat B.call(B.java:2)");
    }

    #[rstest]
    fn two_level_chain_has_exactly_one_separator() {
        let cause = ErrorInfo::new("java.io.IOException")
            .with_message("disk gone")
            .with_frames(vec![StackFrame::new("C.write", "C.java", 7)]);
        let head = boom().with_cause(cause.clone());

        let rendered = render_chain(&head);
        assert_eq!(rendered.matches("\nCaused by: ").count(), 1);

        let suffix = rendered
            .split_once("\nCaused by: ")
            .expect("separator present")
            .1;
        assert_eq!(suffix, render_chain(&cause));
    }

    #[rstest]
    fn deep_chain_is_truncated_at_the_cap() {
        let mut current = ErrorInfo::new("Root").with_message("root cause");
        for i in 1..100 {
            current = ErrorInfo::new(format!("Error{i}"))
                .with_message(format!("level {i}"))
                .with_cause(current);
        }

        let rendered = render_chain(&current);

        // Head plus MAX_CAUSE_DEPTH - 1 causes render, then the marker.
        assert_eq!(rendered.matches("\nCaused by: ").count(), MAX_CAUSE_DEPTH);
        assert!(rendered.ends_with(TRUNCATION_MARKER));
        assert!(rendered.contains("Error99: level 99"));
        assert!(!rendered.contains("Root: root cause"));
    }

    #[rstest]
    fn chain_at_the_cap_is_not_truncated() {
        let mut current = ErrorInfo::new("Root");
        for i in 1..MAX_CAUSE_DEPTH {
            current = ErrorInfo::new(format!("Error{i}")).with_cause(current);
        }

        let rendered = render_chain(&current);
        assert_eq!(rendered.matches("\nCaused by: ").count(), MAX_CAUSE_DEPTH - 1);
        assert!(!rendered.contains(TRUNCATION_MARKER));
        assert!(rendered.contains("Root"));
    }

    #[rstest]
    fn rendering_is_deterministic() {
        let head = boom().with_cause(ErrorInfo::new("Inner"));
        assert_eq!(render_chain(&head), render_chain(&head));
    }

    #[rstest]
    fn stack_frame_display_matches_host_framework_form() {
        let frame = StackFrame::new("com.app.Service.call", "Service.java", 42);
        assert_eq!(frame.to_string(), "at com.app.Service.call(Service.java:42)");
    }
}
