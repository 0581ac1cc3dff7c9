//! The grader: one task definition, one result record, one verdict.
//!
//! The grader enforces a fixed pipeline:
//!
//!   Intake → Resolve → Parse → Compare → Task checks → Assemble
//!
//! Grading never errors. Every failure mode surfaces as a failing `Verdict`
//! with feedback, so a host can record it alongside passing runs.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    record::{RecordIntake, ResultRecord},
    task::{AnswerFormat, FieldSpec, ScalarKind, TaskDefinition},
    verdict::{CheckOutcome, FieldCheck, Verdict},
};
use assessor_extract::{parse_integer, parse_object, TagPattern, TranscriptResolver};

use crate::intake::RecordIntaker;
use crate::report::{self, ReportInput};
use crate::traits::Comparator;

/// Task-level check run against the resolved answer text.
pub type CustomCheckFn = Box<dyn Fn(&str) -> CheckOutcome + Send + Sync>;

/// Grades result records against a single task definition.
///
/// Construct one grader per task; it is immutable once checks are
/// registered and may be shared across threads.
pub struct Grader {
    task: TaskDefinition,
    resolver: TranscriptResolver,
    /// Per-field tag patterns, parallel to `task.fields`. Only built for
    /// tagged answers.
    field_tags: Vec<TagPattern>,
    intaker: RecordIntaker,
    comparator: Box<dyn Comparator>,
    checks: HashMap<String, CustomCheckFn>,
}

impl Grader {
    /// Create a grader, compiling every pattern the task needs up front.
    pub fn new(task: TaskDefinition, comparator: Box<dyn Comparator>) -> AssessorResult<Self> {
        let resolver = TranscriptResolver::new(&task.locator).map_err(|e| {
            AssessorError::ConfigError {
                reason: format!("task '{}': invalid answer tag: {e}", task.id),
            }
        })?;

        let field_tags = match task.format {
            AnswerFormat::Tagged => task
                .fields
                .iter()
                .map(|field| {
                    let tag = field.tag.as_deref().unwrap_or(&field.name);
                    TagPattern::new(tag).map_err(|e| AssessorError::ConfigError {
                        reason: format!("task '{}': invalid tag for field '{}': {e}", task.id, field.name),
                    })
                })
                .collect::<AssessorResult<Vec<_>>>()?,
            _ => Vec::new(),
        };

        Ok(Self {
            task,
            resolver,
            field_tags,
            intaker: RecordIntaker::new()?,
            comparator,
            checks: HashMap::new(),
        })
    }

    /// Register a task-level check under `name`.
    ///
    /// Only checks the task definition lists are run; registering one it does
    /// not list has no effect on grading.
    pub fn register_check(&mut self, name: impl Into<String>, check: CustomCheckFn) {
        self.checks.insert(name.into(), check);
    }

    pub fn task(&self) -> &TaskDefinition {
        &self.task
    }

    /// Grade a raw result record.
    pub fn grade(&self, record: &Value) -> Verdict {
        let intake = self.intaker.intake(record);
        self.grade_intake(&intake)
    }

    /// Grade an already-typed result record.
    pub fn grade_record(&self, record: &ResultRecord) -> Verdict {
        self.grade_intake(&RecordIntake::WellFormed(record.clone()))
    }

    fn grade_intake(&self, intake: &RecordIntake) -> Verdict {
        let record = intake.record();
        let task_completed = record.task_completed();
        let task_id = self.task.id.as_str();

        let mut metadata = Map::new();
        metadata.insert(
            "conversation_length".into(),
            json!(record.transcript.entry_count()),
        );
        metadata.insert(
            "skipped_entries".into(),
            json!(record.transcript.skipped_entries()),
        );
        if !intake.issues().is_empty() {
            metadata.insert("input_issues".into(), json!(intake.issues()));
        }

        // ── Resolve the answer text ──────────────────────────────────────────
        let Some(resolution) = self.resolver.resolve(record) else {
            warn!(task_id, task_completed, "no answer text found in result record");
            return report::no_answer(task_completed, &self.task.missing_answer_hint(), metadata);
        };
        metadata.insert("answer_source".into(), json!(resolution.source.as_str()));

        // ── Parse and compare fields ─────────────────────────────────────────
        let (fields, parsed_answer) = match self.task.format {
            AnswerFormat::Json => match parse_object(&resolution.text) {
                Ok(parsed) => {
                    metadata.insert("parse_strategy".into(), json!(parsed.strategy.as_str()));
                    let checks = self
                        .task
                        .fields
                        .iter()
                        .map(|field| self.compare(field, parsed.fields.get(&field.name).cloned()))
                        .collect();
                    (checks, Value::Object(parsed.fields))
                }
                Err(error) => {
                    warn!(task_id, error = %error, "answer is not a JSON object");
                    return report::unparsable(task_completed, &resolution.text, &error, metadata);
                }
            },
            AnswerFormat::Integer => self.grade_integer(&resolution.text),
            AnswerFormat::Tagged => self.grade_tagged(&resolution.text),
        };

        // ── Task-level checks ────────────────────────────────────────────────
        let outcomes = self.run_checks(&resolution.text);

        let verdict = report::assemble(ReportInput {
            task_completed,
            fields,
            outcomes,
            parsed_answer,
            expected_answer: self.task.expected_answer(),
            input_issues: intake.issues().to_vec(),
            metadata,
        });

        info!(
            task_id,
            passed = verdict.passed,
            source = resolution.source.as_str(),
            "record graded"
        );
        verdict
    }

    fn grade_integer(&self, text: &str) -> (Vec<FieldCheck>, Value) {
        let Some(field) = self.task.fields.first() else {
            return (Vec::new(), Value::Null);
        };
        match parse_integer(text) {
            Ok(n) => {
                let check = self.compare(field, Some(json!(n)));
                (vec![check], json!(n))
            }
            Err(error) => (vec![unobtainable(field, error.to_string())], Value::Null),
        }
    }

    fn grade_tagged(&self, text: &str) -> (Vec<FieldCheck>, Value) {
        let mut parsed = Map::new();
        let checks = self
            .task
            .fields
            .iter()
            .zip(&self.field_tags)
            .map(|(field, tag)| {
                let Some(raw) = tag.first(text).filter(|inner| !inner.is_empty()) else {
                    return unobtainable(field, format!("no {} found in response", tag.markers()));
                };
                let value = match field.parse {
                    ScalarKind::Text => Value::String(raw),
                    ScalarKind::Integer => match parse_integer(&raw) {
                        Ok(n) => json!(n),
                        Err(error) => return unobtainable(field, error.to_string()),
                    },
                };
                parsed.insert(field.name.clone(), value.clone());
                self.compare(field, Some(value))
            })
            .collect();
        (checks, Value::Object(parsed))
    }

    fn compare(&self, field: &FieldSpec, got: Option<Value>) -> FieldCheck {
        let passed = self.comparator.check(got.as_ref(), field);
        debug!(
            field = field.name.as_str(),
            rule = field.rule.kind(),
            passed,
            "field compared"
        );
        FieldCheck {
            field: field.name.clone(),
            label: field.label().to_string(),
            passed,
            got,
            expected: field.expected.clone(),
            tolerance: field.rule.tolerance(),
            note: None,
        }
    }

    fn run_checks(&self, text: &str) -> Vec<CheckOutcome> {
        self.task
            .checks
            .iter()
            .map(|name| match self.checks.get(name) {
                Some(check) => {
                    let outcome = check(text);
                    debug!(check = name.as_str(), passed = outcome.passed, "task check ran");
                    outcome
                }
                None => {
                    warn!(check = name.as_str(), "task check is not registered");
                    CheckOutcome::failed(
                        name.clone(),
                        format!("no check registered for function name '{name}'"),
                    )
                }
            })
            .collect()
    }
}

/// A failing check for a field whose value could not be obtained.
fn unobtainable(field: &FieldSpec, note: String) -> FieldCheck {
    FieldCheck {
        field: field.name.clone(),
        label: field.label().to_string(),
        passed: false,
        got: None,
        expected: field.expected.clone(),
        tolerance: field.rule.tolerance(),
        note: Some(note),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
