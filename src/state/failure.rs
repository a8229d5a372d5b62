// Failure records handed to reporters by the test-execution engine

use serde::Deserialize;
use thiserror::Error;

/// A check failed on an assertion with a known source location
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
    pub file: String,
    pub line: u32,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            line,
        }
    }
}

/// A failure not attributable to a single check (e.g. a broken setup hook)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RunError {
    pub message: String,
}

impl RunError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
