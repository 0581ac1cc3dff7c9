//! Report assembly: itemized checks into one `Verdict`.
//!
//! Feedback line order is fixed:
//!
//!   field lines → task-level check lines → malformed-input line → status line
//!
//! `passed` is the conjunction of task completion, a well-formed record, every
//! field check, and every task-level check.

use serde_json::{json, Map, Value};

use assessor_contracts::verdict::{mark, CheckOutcome, FieldCheck, Verdict, FAIL_MARK};
use assessor_extract::parse::{preview, ParseError};

/// Longest slice of raw answer text kept in diagnostics of unparsable answers.
const OUTPUT_PREVIEW_CHARS: usize = 500;

/// Characters of raw answer text quoted in the unparsable feedback line.
const FEEDBACK_PREVIEW_CHARS: usize = 200;

/// Everything the assembler needs for a fully graded answer.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub task_completed: bool,
    pub fields: Vec<FieldCheck>,
    pub outcomes: Vec<CheckOutcome>,
    /// The answer as parsed, before comparison.
    pub parsed_answer: Value,
    pub expected_answer: Map<String, Value>,
    /// Shape violations found at intake.
    pub input_issues: Vec<String>,
    /// Transcript and resolution metadata merged into the details.
    pub metadata: Map<String, Value>,
}

/// Fold field and task-level checks into the final verdict.
pub fn assemble(input: ReportInput) -> Verdict {
    let ReportInput {
        task_completed,
        fields,
        outcomes,
        parsed_answer,
        expected_answer,
        input_issues,
        metadata,
    } = input;

    let mut lines: Vec<String> = fields.iter().map(render_field).collect();
    for outcome in &outcomes {
        lines.extend(outcome.lines.iter().cloned());
    }
    if !input_issues.is_empty() {
        lines.push(malformed_line(&input_issues));
    }
    if !task_completed {
        lines.push(status_line());
    }

    let all_correct =
        fields.iter().all(|f| f.passed) && outcomes.iter().all(|o| o.passed);
    let passed = task_completed && input_issues.is_empty() && all_correct;

    let mut checks = Map::new();
    for field in &fields {
        checks.insert(field.field.clone(), field_detail(field));
    }
    for outcome in &outcomes {
        checks.insert(outcome.name.clone(), json!({ "passed": outcome.passed }));
    }

    let mut details = metadata;
    details.insert("task_completed".into(), json!(task_completed));
    details.insert("parsed_answer".into(), parsed_answer);
    details.insert("expected_answer".into(), Value::Object(expected_answer));
    details.insert("checks".into(), Value::Object(checks));
    details.insert("all_correct".into(), json!(all_correct));
    if !outcomes.is_empty() {
        let verification: Map<String, Value> = outcomes
            .iter()
            .map(|o| (o.name.clone(), o.details.clone()))
            .collect();
        details.insert("verification".into(), Value::Object(verification));
    }
    if !input_issues.is_empty() {
        details.insert("input_issues".into(), json!(input_issues));
    }

    Verdict {
        passed,
        feedback: lines.join("\n"),
        details,
    }
}

/// Verdict for a record with no locatable answer text.
pub fn no_answer(task_completed: bool, hint: &str, metadata: Map<String, Value>) -> Verdict {
    let mut details = metadata;
    details.insert("task_completed".into(), json!(task_completed));
    Verdict {
        passed: false,
        feedback: hint.to_string(),
        details,
    }
}

/// Verdict for answer text that could not be parsed into the required shape.
pub fn unparsable(
    task_completed: bool,
    text: &str,
    error: &ParseError,
    metadata: Map<String, Value>,
) -> Verdict {
    let mut details = metadata;
    details.insert("task_completed".into(), json!(task_completed));
    details.insert("output_answer".into(), json!(preview(text, OUTPUT_PREVIEW_CHARS)));
    details.insert("parse_error".into(), json!(error.to_string()));
    Verdict {
        passed: false,
        feedback: format!(
            "Could not parse answer as JSON: {}",
            preview(text, FEEDBACK_PREVIEW_CHARS)
        ),
        details,
    }
}

/// One feedback line for a field check.
pub fn render_field(check: &FieldCheck) -> String {
    let marker = mark(check.passed);
    if let Some(note) = &check.note {
        return format!("{marker} {}: {note}", check.label);
    }
    let mut line = format!(
        "{marker} {}: got {}, expected {}",
        check.label,
        display_value(check.got.as_ref()),
        display_value(Some(&check.expected)),
    );
    if let Some(tolerance) = check.tolerance {
        line.push_str(&format!(" (tolerance: ±{tolerance})"));
    }
    line
}

/// Render a value for feedback: strings quoted, absent as `N/A`, anything
/// else as compact JSON.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(Value::String(s)) => format!("'{s}'"),
        Some(other) => other.to_string(),
    }
}

fn field_detail(check: &FieldCheck) -> Value {
    let mut detail = json!({
        "passed": check.passed,
        "got": check.got.clone().unwrap_or(Value::Null),
        "expected": check.expected,
    });
    if let Some(tolerance) = check.tolerance {
        detail["tolerance"] = json!(tolerance);
    }
    if let Some(note) = &check.note {
        detail["note"] = json!(note);
    }
    detail
}

fn malformed_line(issues: &[String]) -> String {
    format!("{FAIL_MARK} Result record is malformed: {}", issues.join("; "))
}

fn status_line() -> String {
    format!("{FAIL_MARK} Task status is not success.")
}
