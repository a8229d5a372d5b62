// Lifecycle events - recorded form of every Reporter call
//
// One JSON object per line, tagged by "event", e.g.
//   {"event":"context_start","name":"my context"}

use crate::report::Reporter;
use crate::state::{AssertionFailure, RunError};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::BufRead;

/// A single recorded reporter call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TestEvent {
    RunStart,
    RunComplete,
    ContextStart {
        name: String,
    },
    ContextEnd {
        name: String,
    },
    CheckStart {
        name: String,
    },
    CheckSkip {
        name: String,
    },
    CheckPass {
        name: String,
    },
    CheckFail {
        name: String,
        #[serde(flatten)]
        failure: AssertionFailure,
    },
    CheckUnknownError {
        name: String,
    },
    RunError {
        name: String,
        message: String,
    },
}

impl TestEvent {
    /// Deliver this event to a reporter
    pub fn apply(&self, reporter: &mut dyn Reporter) {
        match self {
            TestEvent::RunStart => reporter.on_run_start(),
            TestEvent::RunComplete => reporter.on_run_complete(),
            TestEvent::ContextStart { name } => reporter.on_context_start(name),
            TestEvent::ContextEnd { name } => reporter.on_context_end(name),
            TestEvent::CheckStart { name } => reporter.on_check_start(name),
            TestEvent::CheckSkip { name } => reporter.on_check_skip(name),
            TestEvent::CheckPass { name } => reporter.on_check_pass(name),
            TestEvent::CheckFail { name, failure } => reporter.on_check_fail(name, failure),
            TestEvent::CheckUnknownError { name } => reporter.on_check_unknown_error(name),
            TestEvent::RunError { name, message } => {
                reporter.on_run_error(name, &RunError::new(message.as_str()))
            }
        }
    }
}

/// Parse one line of an event stream.
///
/// Blank lines and `#` comments yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<TestEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let event = serde_json::from_str(trimmed).context("Invalid event JSON")?;
    Ok(Some(event))
}

/// Outcome of streaming an event log into a reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// Events delivered to the reporter
    pub events: usize,
    /// Whether the last delivered event was `run_complete`
    pub completed: bool,
}

/// Parse and deliver events one line at a time.
///
/// On a malformed line every earlier event has already reached the reporter.
pub fn replay_events<R: BufRead>(
    reader: R,
    reporter: &mut dyn Reporter,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read event line {}", line_no))?;
        if let Some(event) = parse_event_line(&line)
            .with_context(|| format!("Malformed event on line {}", line_no))?
        {
            event.apply(reporter);
            summary.events += 1;
            summary.completed = matches!(event, TestEvent::RunComplete);
        }
    }
    Ok(summary)
}
