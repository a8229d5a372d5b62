// TAP reporter - outputs nested TAP version 13 subtests

use super::{Reporter, escape_yaml};
use crate::state::{AssertionFailure, ContextStack, RunError};
use std::io::{self, Write};
use tracing::{debug, trace, warn};

const TAP_HEADER: &str = "TAP version 13";
const INDENT_WIDTH: usize = 4;

/// TAP reporter
///
/// Every event is written to the sink as soon as it arrives. Lines for a
/// scope are indented by its nesting depth, so a closing context emits its
/// plan one level deeper than its own outcome line.
pub struct TapReporter<W: Write> {
    out: W,
    contexts: ContextStack,
    /// Outcome captured when the root scope is popped
    success: bool,
    flush: bool,
    sink_error: Option<io::Error>,
}

impl<W: Write> TapReporter<W> {
    /// Create new TAP reporter
    pub fn new(out: W) -> Self {
        Self {
            out,
            contexts: ContextStack::new(),
            success: true,
            flush: true,
            sink_error: None,
        }
    }

    /// Flush the sink after every event (default: on)
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// Current number of open scopes, root included
    pub fn depth(&self) -> usize {
        self.contexts.depth()
    }

    /// First write error hit on the sink, if any
    pub fn take_sink_error(&mut self) -> Option<io::Error> {
        self.sink_error.take()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Return the sink. Buffered sinks are left for the caller to flush.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent(&self) -> String {
        " ".repeat(INDENT_WIDTH * self.contexts.level())
    }

    /// Append one line at the current depth
    fn line(&self, buf: &mut String, text: &str) {
        buf.push_str(&self.indent());
        buf.push_str(text);
        buf.push('\n');
    }

    /// Append a YAML diagnostic block with no source location
    fn unlocated_block(&self, buf: &mut String, message: &str) {
        self.line(buf, "  ---");
        self.line(buf, "  at: ~");
        self.line(buf, &format!("  message: {}", message));
        self.line(buf, "  ...");
    }

    fn located_block(&self, buf: &mut String, failure: &AssertionFailure) {
        self.line(buf, "  ---");
        self.line(buf, "  at:");
        self.line(buf, &format!("    file: '{}'", failure.file));
        self.line(buf, &format!("    line: {}", failure.line));
        self.line(
            buf,
            &format!("  message: \"{}\"", escape_yaml(&failure.message)),
        );
        self.line(buf, "  ...");
    }

    fn outcome(&self, buf: &mut String, ok: bool, ordinal: usize, name: &str) {
        let status = if ok { "ok" } else { "not ok" };
        self.line(buf, &format!("{} {} - {}", status, ordinal, name));
    }

    fn emit(&mut self, text: &str) {
        let mut result = self.out.write_all(text.as_bytes());
        if result.is_ok() && self.flush {
            result = self.out.flush();
        }

        if let Err(e) = result {
            warn!("Failed to write TAP output: {}", e);
            if self.sink_error.is_none() {
                self.sink_error = Some(e);
            }
        }
    }
}

impl<W: Write> Reporter for TapReporter<W> {
    fn on_run_start(&mut self) {
        debug!("TAP run starting");
        let mut buf = String::new();
        self.line(&mut buf, TAP_HEADER);
        self.contexts.push();
        self.emit(&buf);
    }

    fn on_run_complete(&mut self) {
        if self.contexts.depth() != 1 {
            warn!(
                "Run completed with {} open scopes, expected only the root",
                self.contexts.depth()
            );
        }

        let mut buf = String::new();
        let root = self.contexts.top().map(|ctx| (ctx.succeeded, ctx.spec_count));
        if let Some((succeeded, spec_count)) = root {
            self.success = succeeded;
            self.line(&mut buf, &format!("1..{}", spec_count));
        }
        self.contexts.pop();
        debug!(success = self.success, "TAP run complete");
        self.emit(&buf);
    }

    fn on_context_start(&mut self, name: &str) {
        debug!(context = name, depth = self.contexts.depth(), "Context starting");
        let mut buf = String::new();
        self.line(&mut buf, &format!("# Subtest: {}", name));
        self.contexts.push();
        self.emit(&buf);
    }

    fn on_context_end(&mut self, name: &str) {
        let mut buf = String::new();

        // Plan at the child's depth, before the pop
        let plan = self.contexts.top().map(|ctx| ctx.spec_count).unwrap_or(0);
        self.line(&mut buf, &format!("1..{}", plan));

        let Some(closed) = self.contexts.close() else {
            warn!(context = name, "Context ended with no open scope");
            self.emit(&buf);
            return;
        };

        self.outcome(&mut buf, closed.succeeded, closed.ordinal, name);
        if let Some(error) = closed.pending_error.as_deref().filter(|e| !e.is_empty()) {
            self.unlocated_block(&mut buf, &format!("\"{}\"", escape_yaml(error)));
        }

        debug!(context = name, succeeded = closed.succeeded, "Context ended");
        self.emit(&buf);
    }

    fn on_run_error(&mut self, name: &str, error: &RunError) {
        debug!(scope = name, error = %error, "Run error attached to open scope");
        self.contexts.attach_error(error.message.as_str());
    }

    fn on_check_start(&mut self, name: &str) {
        trace!(check = name, "Check starting");
    }

    fn on_check_skip(&mut self, name: &str) {
        trace!(check = name, "Check skipped");
        let ordinal = self.contexts.record_child();
        let mut buf = String::new();
        self.line(&mut buf, &format!("ok {} - {} # SKIP", ordinal, name));
        self.emit(&buf);
    }

    fn on_check_pass(&mut self, name: &str) {
        trace!(check = name, "Check passed");
        let ordinal = self.contexts.record_child();
        let mut buf = String::new();
        self.outcome(&mut buf, true, ordinal, name);
        self.emit(&buf);
    }

    fn on_check_fail(&mut self, name: &str, failure: &AssertionFailure) {
        trace!(check = name, file = %failure.file, line = failure.line, "Check failed");
        self.contexts.fail();
        let ordinal = self.contexts.record_child();
        let mut buf = String::new();
        self.outcome(&mut buf, false, ordinal, name);
        self.located_block(&mut buf, failure);
        self.emit(&buf);
    }

    fn on_check_unknown_error(&mut self, name: &str) {
        trace!(check = name, "Check failed with unknown error");
        self.contexts.fail();
        let ordinal = self.contexts.record_child();
        let mut buf = String::new();
        self.outcome(&mut buf, false, ordinal, name);
        self.unlocated_block(&mut buf, "unknown error!");
        self.emit(&buf);
    }

    fn did_we_pass(&self) -> bool {
        self.contexts.succeeded().unwrap_or(self.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: TapReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    /// Sink that rejects every write
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_did_we_pass_before_run() {
        let reporter = TapReporter::new(Vec::new());
        assert!(reporter.did_we_pass());
    }

    #[test]
    fn test_check_start_writes_nothing() {
        let mut reporter = TapReporter::new(Vec::new());
        reporter.on_run_start();
        reporter.on_check_start("my test");
        assert_eq!(reporter.get_ref().as_slice(), b"TAP version 13\n");
    }

    #[test]
    fn test_top_level_checks_are_not_indented() {
        let mut reporter = TapReporter::new(Vec::new());
        reporter.on_run_start();
        reporter.on_check_pass("first");
        reporter.on_check_skip("second");
        reporter.on_run_complete();

        assert_eq!(
            output(reporter),
            "TAP version 13\nok 1 - first\nok 2 - second # SKIP\n1..2\n"
        );
    }

    #[test]
    fn test_depth_tracks_open_scopes() {
        let mut reporter = TapReporter::new(Vec::new());
        assert_eq!(reporter.depth(), 0);
        reporter.on_run_start();
        reporter.on_context_start("a");
        reporter.on_context_start("b");
        assert_eq!(reporter.depth(), 3);
        reporter.on_context_end("b");
        reporter.on_context_end("a");
        reporter.on_run_complete();
        assert_eq!(reporter.depth(), 0);
    }

    #[test]
    fn test_run_error_under_root_only_fails_run() {
        let mut reporter = TapReporter::new(Vec::new());
        reporter.on_run_start();
        reporter.on_run_error("root", &RunError::new("setup broke"));
        assert!(!reporter.did_we_pass());
        reporter.on_run_complete();
        assert!(!reporter.did_we_pass());

        assert_eq!(output(reporter), "TAP version 13\n1..0\n");
    }

    #[test]
    fn test_sink_error_is_kept_and_not_raised() {
        let mut reporter = TapReporter::new(BrokenSink);
        reporter.on_run_start();
        reporter.on_check_pass("still counted");
        reporter.on_run_complete();

        assert!(reporter.did_we_pass());
        let err = reporter.take_sink_error().expect("sink error should be kept");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(reporter.take_sink_error().is_none());
    }

    #[test]
    fn test_without_flush_output_is_identical() {
        let mut reporter = TapReporter::new(Vec::new()).with_flush(false);
        reporter.on_run_start();
        reporter.on_check_pass("t");
        reporter.on_run_complete();
        assert_eq!(output(reporter), "TAP version 13\nok 1 - t\n1..1\n");
    }
}
