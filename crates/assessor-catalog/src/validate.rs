//! Structural checks on task definitions beyond what serde enforces.
//!
//! A definition that deserializes can still be unusable: an integer task
//! with two fields, a numeric rule with a negative tolerance, a set rule
//! whose expected value is a string. These are configuration errors and are
//! reported before any grading happens.

use std::collections::HashSet;

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    task::{AnswerFormat, FieldRule, FieldSpec, TaskDefinition},
};

/// Check `task` for internal consistency.
///
/// Returns `AssessorError::ConfigError` naming the task and the first
/// problem found.
pub fn validate(task: &TaskDefinition) -> AssessorResult<()> {
    let fail = |reason: String| -> AssessorResult<()> {
        Err(AssessorError::ConfigError {
            reason: format!("task '{}': {reason}", task.id),
        })
    };

    if task.id.trim().is_empty() {
        return Err(AssessorError::ConfigError {
            reason: "task id must not be empty".to_string(),
        });
    }
    if task.fields.is_empty() {
        return fail("at least one field is required".to_string());
    }
    if task.locator.tag.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return fail("locator tag must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for field in &task.fields {
        if !seen.insert(field.name.as_str()) {
            return fail(format!("duplicate field '{}'", field.name));
        }
        if let Err(reason) = validate_field(field, task.format) {
            return fail(format!("field '{}': {reason}", field.name));
        }
    }

    if task.format == AnswerFormat::Integer && task.fields.len() != 1 {
        return fail(format!(
            "integer answers bind exactly one field, found {}",
            task.fields.len()
        ));
    }

    if let Some(check) = task.checks.iter().find(|c| c.trim().is_empty()) {
        return fail(format!("check name {check:?} must not be empty"));
    }

    Ok(())
}

fn validate_field(field: &FieldSpec, format: AnswerFormat) -> Result<(), String> {
    if field.name.trim().is_empty() {
        return Err("field name must not be empty".to_string());
    }

    if format == AnswerFormat::Tagged
        && field.tag.as_deref().map_or(true, |t| t.trim().is_empty())
    {
        return Err("tagged answers need a tag per field".to_string());
    }

    match &field.rule {
        FieldRule::Numeric { tolerance } => {
            if !tolerance.is_finite() || *tolerance < 0.0 {
                return Err(format!("tolerance must be finite and non-negative, got {tolerance}"));
            }
            if !field.expected.is_number() {
                return Err(format!("numeric rule needs a numeric expected value, got {}", field.expected));
            }
        }
        FieldRule::NormalizedSet => {
            if !field.expected.is_array() {
                return Err(format!("set rule needs a list expected value, got {}", field.expected));
            }
        }
        FieldRule::Custom { function } if function.trim().is_empty() => {
            return Err("custom rule needs a function name".to_string());
        }
        _ => {}
    }

    Ok(())
}
