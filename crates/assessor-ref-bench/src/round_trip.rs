//! The single-symbol round-trip check for the minimum-comm task.
//!
//! The answer must carry an `encode` routine in `<encode_function>` and a
//! `decode` routine in `<decode_function>`. Both are loaded into one fresh
//! namespace by a `SnippetRuntime` and exercised on a fixed battery of
//! integer lists. The check passes when every encoding uses exactly one
//! distinct symbol and every decoding reproduces its input.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    snippet::{CaseOutcome, RoundTripBattery, RoundTripRun},
    verdict::{CheckOutcome, FAIL_MARK, PASS_MARK},
};
use assessor_core::{traits::SnippetRuntime, CustomCheckFn};
use assessor_extract::TagPattern;

/// Name the task definition lists under `checks`.
pub const SINGLE_SYMBOL_ROUND_TRIP: &str = "single-symbol-round-trip";

pub const ENCODE_TAG: &str = "encode_function";
pub const DECODE_TAG: &str = "decode_function";
pub const ENCODE_ROUTINE: &str = "encode";
pub const DECODE_ROUTINE: &str = "decode";

/// Distinct symbols every encoding must use.
pub const EXPECTED_SYMBOLS: u64 = 1;

/// The integer lists every submitted scheme must round-trip.
pub fn default_cases() -> Vec<Value> {
    vec![
        json!([1]),
        json!([1, 2]),
        json!([2, 1]),
        json!([1, 2, 3]),
        json!([1, 2, 3, 4, 5]),
    ]
}

/// Extracts the routines from answer text and grades them via a runtime.
pub struct RoundTripCheck {
    runtime: Arc<dyn SnippetRuntime>,
    encode_tag: TagPattern,
    decode_tag: TagPattern,
    cases: Vec<Value>,
}

impl RoundTripCheck {
    pub fn new(runtime: Arc<dyn SnippetRuntime>) -> AssessorResult<Self> {
        let compile = |tag: &str| {
            TagPattern::new(tag).map_err(|e| AssessorError::ConfigError {
                reason: format!("invalid snippet tag '{tag}': {e}"),
            })
        };
        Ok(Self {
            runtime,
            encode_tag: compile(ENCODE_TAG)?,
            decode_tag: compile(DECODE_TAG)?,
            cases: default_cases(),
        })
    }

    pub fn with_cases(mut self, cases: Vec<Value>) -> Self {
        self.cases = cases;
        self
    }

    /// Box the check for `Grader::register_check`.
    pub fn into_check(self) -> CustomCheckFn {
        Box::new(move |text: &str| self.run(text))
    }

    /// Grade the routines found in `text`.
    pub fn run(&self, text: &str) -> CheckOutcome {
        let encode_source = self.encode_tag.first(text).filter(|s| !s.is_empty());
        let decode_source = self.decode_tag.first(text).filter(|s| !s.is_empty());

        let mut lines = Vec::new();
        let mut details = json!({
            "has_encode_function": encode_source.is_some(),
            "has_decode_function": decode_source.is_some(),
        });

        if encode_source.is_none() {
            lines.push(format!("{FAIL_MARK} No {} found in response.", self.encode_tag.markers()));
        }
        if decode_source.is_none() {
            lines.push(format!("{FAIL_MARK} No {} found in response.", self.decode_tag.markers()));
        }
        let (Some(encode_source), Some(decode_source)) = (encode_source, decode_source) else {
            return outcome(false, lines, details);
        };

        let battery = RoundTripBattery {
            snippets: vec![encode_source, decode_source],
            encode: ENCODE_ROUTINE.to_string(),
            decode: DECODE_ROUTINE.to_string(),
            cases: self.cases.clone(),
        };

        let run = match self.runtime.run_round_trip(&battery) {
            Ok(run) => run,
            Err(e) => {
                warn!(error = %e, "snippet runtime failed");
                lines.push(format!("{FAIL_MARK} Error executing functions: {e}"));
                return outcome(false, lines, details);
            }
        };

        let passed = self.judge(&run, &mut lines);
        details["cases"] = json!(run.cases.len());
        debug!(passed, cases = run.cases.len(), "round-trip check complete");
        outcome(passed, lines, details)
    }

    fn judge(&self, run: &RoundTripRun, lines: &mut Vec<String>) -> bool {
        if let Some(error) = &run.load_error {
            lines.push(format!("{FAIL_MARK} Error executing functions: {error}"));
            return false;
        }

        let mut defined = true;
        for routine in [ENCODE_ROUTINE, DECODE_ROUTINE] {
            if !run.defines(routine) {
                lines.push(format!("{FAIL_MARK} {routine} function not defined correctly."));
                defined = false;
            }
        }
        if !defined {
            return false;
        }

        if run.cases.len() != self.cases.len() {
            lines.push(format!(
                "{FAIL_MARK} Error executing functions: runtime returned {} outcomes for {} cases",
                run.cases.len(),
                self.cases.len()
            ));
            return false;
        }

        let mut symbol_failures = Vec::new();
        let mut round_trip_failures = Vec::new();
        for (i, (case, result)) in self.cases.iter().zip(&run.cases).enumerate() {
            let label = format!("  Test {} {}", i + 1, render_case(case));
            if let Some(line) = symbol_failure(&label, result) {
                symbol_failures.push(line);
            }
            if let Some(line) = round_trip_failure(&label, result) {
                round_trip_failures.push(line);
            }
        }

        if symbol_failures.is_empty() {
            lines.push(format!(
                "{PASS_MARK} All encoded strings use exactly {EXPECTED_SYMBOLS} unique character"
            ));
        } else {
            lines.push(format!(
                "{FAIL_MARK} Some encoded strings do not use exactly {EXPECTED_SYMBOLS} unique character"
            ));
            lines.extend(symbol_failures.iter().cloned());
        }

        if round_trip_failures.is_empty() {
            lines.push(format!(
                "{PASS_MARK} All {} test cases passed encode/decode correctly",
                self.cases.len()
            ));
        } else {
            lines.push(format!("{FAIL_MARK} Some test cases failed:"));
            lines.extend(round_trip_failures.iter().cloned());
        }

        symbol_failures.is_empty() && round_trip_failures.is_empty()
    }
}

fn symbol_failure(label: &str, result: &CaseOutcome) -> Option<String> {
    let symbols = result.distinct_symbols?;
    (symbols != EXPECTED_SYMBOLS).then(|| {
        format!(
            "{label}: encoded '{}...' has {symbols} unique chars (expected {EXPECTED_SYMBOLS})",
            result.encoded_preview.as_deref().unwrap_or_default()
        )
    })
}

fn round_trip_failure(label: &str, result: &CaseOutcome) -> Option<String> {
    if let Some(error) = &result.error {
        return Some(format!("{label}: error - {error}"));
    }
    (!result.matches).then(|| {
        format!(
            "{label}: decoded as {} (mismatch)",
            result.decoded_preview.as_deref().unwrap_or("N/A")
        )
    })
}

fn outcome(passed: bool, lines: Vec<String>, details: Value) -> CheckOutcome {
    CheckOutcome {
        name: SINGLE_SYMBOL_ROUND_TRIP.to_string(),
        passed,
        lines,
        details,
    }
}

/// Lists render as `[1, 2, 3]`.
fn render_case(case: &Value) -> String {
    match case {
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_case).collect();
            format!("[{}]", inner.join(", "))
        }
        other => other.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
