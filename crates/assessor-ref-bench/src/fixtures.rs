//! Shared test doubles and record builders for the scenario tests.

use std::sync::Arc;

use serde_json::{json, Value};

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    snippet::{CaseOutcome, RoundTripBattery, RoundTripRun},
};
use assessor_core::traits::SnippetRuntime;

use crate::bench::Bench;

/// Fails every call; for tasks that never execute snippets.
pub struct NoRuntime;

impl SnippetRuntime for NoRuntime {
    fn run_round_trip(&self, _battery: &RoundTripBattery) -> AssessorResult<RoundTripRun> {
        Err(AssessorError::RuntimeUnavailable {
            reason: "no snippet runtime in this test".to_string(),
        })
    }
}

/// Reports every case of every battery as a perfect single-symbol round trip.
pub struct PerfectRuntime;

impl SnippetRuntime for PerfectRuntime {
    fn run_round_trip(&self, battery: &RoundTripBattery) -> AssessorResult<RoundTripRun> {
        Ok(RoundTripRun {
            load_error: None,
            defined: vec![battery.encode.clone(), battery.decode.clone()],
            cases: battery
                .cases
                .iter()
                .map(|case| CaseOutcome {
                    encoded_preview: Some("a".to_string()),
                    distinct_symbols: Some(1),
                    decoded_preview: Some(case.to_string()),
                    matches: true,
                    error: None,
                })
                .collect(),
        })
    }
}

pub fn bench(runtime: impl SnippetRuntime + 'static) -> Bench {
    Bench::builtin(Arc::new(runtime)).expect("reference tasks must load")
}

pub fn record(status: &str, task_result: &str) -> Value {
    json!({ "status": status, "task_result": task_result, "conversation": [] })
}

/// A record whose answer only appears in a `task_complete` tool call.
pub fn completion_record(status: &str, result: &str) -> Value {
    let arguments = json!({ "result": result }).to_string();
    json!({
        "status": status,
        "task_result": null,
        "conversation": [
            { "role": "user", "content": "Solve the task." },
            {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "function": { "name": "task_complete", "arguments": arguments }
                }]
            }
        ]
    })
}
