//! Boundary validation of raw result records.
//!
//! The record's shape is checked against a JSON Schema document using the
//! `jsonschema` crate; every violation becomes an issue string. Typed fields
//! are then read with explicit defaults, so a malformed record is still
//! graded. It just cannot pass.

use serde_json::{json, Value};
use tracing::warn;

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    record::{RecordIntake, ResultRecord},
    transcript::Transcript,
};

/// Shape every result record must have.
fn record_schema() -> Value {
    json!({
        "type": "object",
        "required": ["status"],
        "properties": {
            "status": { "type": "string" },
            "task_result": { "type": ["string", "null"] },
            "conversation": { "type": ["array", "null"] }
        }
    })
}

/// Validates raw records and lifts them into `ResultRecord`s.
pub struct RecordIntaker {
    validator: jsonschema::Validator,
}

impl RecordIntaker {
    /// Compile the record schema.
    pub fn new() -> AssessorResult<Self> {
        let validator =
            jsonschema::validator_for(&record_schema()).map_err(|e| AssessorError::ConfigError {
                reason: format!("invalid result record schema: {e}"),
            })?;
        Ok(Self { validator })
    }

    /// Validate `value` and build the typed record.
    pub fn intake(&self, value: &Value) -> RecordIntake {
        let issues: Vec<String> = self
            .validator
            .iter_errors(value)
            .map(|error| {
                let path = error.instance_path.to_string();
                let location = if path.is_empty() { "/".to_string() } else { path };
                format!("JSON Schema violation at {location}: {error}")
            })
            .collect();

        let conversation = value
            .get("conversation")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let record = ResultRecord {
            status: value.get("status").and_then(Value::as_str).map(str::to_owned),
            task_result: value
                .get("task_result")
                .and_then(Value::as_str)
                .map(str::to_owned),
            transcript: Transcript::from_values(conversation),
        };

        if issues.is_empty() {
            RecordIntake::WellFormed(record)
        } else {
            warn!(issue_count = issues.len(), "result record is malformed");
            RecordIntake::Malformed { record, issues }
        }
    }
}
