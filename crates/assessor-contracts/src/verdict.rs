//! Grading outcome types.
//!
//! `FieldCheck` and `CheckOutcome` are the itemized results the report
//! assembler folds into a single `Verdict`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker prefixed to a passing feedback line.
pub const PASS_MARK: &str = "✓";

/// Marker prefixed to a failing feedback line.
pub const FAIL_MARK: &str = "✗";

pub fn mark(passed: bool) -> &'static str {
    if passed {
        PASS_MARK
    } else {
        FAIL_MARK
    }
}

/// The result of comparing one expected field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub field: String,
    pub label: String,
    pub passed: bool,
    /// The value found in the answer; `None` when absent or unparsable.
    pub got: Option<Value>,
    pub expected: Value,
    pub tolerance: Option<f64>,
    /// Replaces the got/expected comparison in feedback when the value could
    /// not be obtained at all (missing tag, unparsable scalar).
    pub note: Option<String>,
}

/// The result of a task-level check registered on the grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    /// Feedback lines, already marked.
    pub lines: Vec<String>,
    pub details: Value,
}

impl CheckOutcome {
    pub fn failed(name: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            lines: vec![format!("{FAIL_MARK} {}", line.into())],
            details: Value::Null,
        }
    }
}

/// The final grading result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// True only if the task completed and every check passed.
    pub passed: bool,
    /// Newline-joined feedback lines.
    pub feedback: String,
    /// Diagnostic mapping: raw and parsed values, per-field results, and
    /// transcript metadata.
    pub details: Map<String, Value>,
}

impl Verdict {
    pub fn feedback_lines(&self) -> impl Iterator<Item = &str> {
        self.feedback.lines()
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}
