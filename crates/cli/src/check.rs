//! Check result types for output formatting.

use serde::Serialize;

use crate::tool::ToolFailure;

/// Name the check reports under.
pub const CHECK_NAME: &str = "prettier";

/// Message attached to every unformatted file.
pub const NOT_FORMATTED_MESSAGE: &str = "File not formatted with Prettier";

/// A single failure posted to the review host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// File path relative to the project root.
    pub file: String,

    /// Line number; 0 means the whole file.
    pub line: u32,

    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Create a file-based violation.
    pub fn file(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// What a check run did, apart from the violations the host collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Number of formatter invocations.
    pub invocations: usize,

    /// Number of failures reported to the host.
    pub reported: usize,

    /// Invocations whose output could not be trusted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_failures: Vec<ToolFailure>,
}

/// Aggregated result of one run, ready for printing.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// ISO 8601 timestamp.
    pub timestamp: String,

    /// Check identifier.
    pub name: &'static str,

    /// Whether every checked file is formatted.
    pub passed: bool,

    /// Number of formatter invocations.
    pub invocations: usize,

    /// Unformatted files (omitted if empty).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,

    /// Invocations whose output could not be trusted (omitted if empty).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_failures: Vec<ToolFailure>,
}

impl CheckOutput {
    /// Combine host violations with the run summary.
    pub fn new(timestamp: String, violations: Vec<Violation>, summary: CheckSummary) -> Self {
        Self {
            timestamp,
            name: CHECK_NAME,
            passed: violations.is_empty(),
            invocations: summary.invocations,
            violations,
            tool_failures: summary.tool_failures,
        }
    }

    /// Count total violations.
    pub fn total_violations(&self) -> usize {
        self.violations.len()
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
