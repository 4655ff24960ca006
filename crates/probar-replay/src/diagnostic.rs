//! Non-fatal diagnostics, kept apart from the error channel.

use std::fmt;

/// What a diagnostic is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The session stopped with expectations still queued
    UnconsumedExpectations {
        /// How many were left
        remaining: usize,
        /// Operation of the first one left
        next_operation: String,
    },
}

/// Advisory message emitted by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What happened
    pub kind: DiagnosticKind,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic for expectations left at session stop
    #[must_use]
    pub fn unconsumed(remaining: usize, next_operation: impl Into<String>) -> Self {
        let next_operation = next_operation.into();
        let message = format!(
            "{remaining} expectation(s) left unconsumed, starting with '{next_operation}'"
        );
        Self {
            kind: DiagnosticKind::UnconsumedExpectations {
                remaining,
                next_operation,
            },
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
