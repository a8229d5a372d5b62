// Report module - result reporters driven by the test-execution engine

pub mod escape;
pub mod tap;

use crate::state::{AssertionFailure, RunError};
pub use escape::escape_yaml;
pub use tap::TapReporter;

/// Reporter trait
///
/// The engine calls these in well-nested order from a single thread. Each
/// output format is one implementation, picked when the engine is built.
pub trait Reporter {
    /// Called once before anything else in the run
    fn on_run_start(&mut self);

    /// Called once after every context has ended
    fn on_run_complete(&mut self);

    /// Called when a context (describe-style scope) opens
    fn on_context_start(&mut self, name: &str);

    /// Called when the innermost open context closes
    fn on_context_end(&mut self, name: &str);

    /// Called when a failure cannot be attributed to a single check
    fn on_run_error(&mut self, name: &str, error: &RunError);

    /// Called when a check starts
    fn on_check_start(&mut self, name: &str);

    /// Called when a check is skipped
    fn on_check_skip(&mut self, name: &str);

    /// Called when a check passes
    fn on_check_pass(&mut self, name: &str);

    /// Called when a check fails on an assertion
    fn on_check_fail(&mut self, name: &str, failure: &AssertionFailure);

    /// Called when a check fails without structured failure data
    fn on_check_unknown_error(&mut self, name: &str);

    /// Whether the run (or the innermost open scope, mid-run) has passed so far
    fn did_we_pass(&self) -> bool;
}
