//! Trait seams of the grading pipeline.
//!
//! - `Comparator`     — decides whether one extracted field matches ground truth
//! - `SnippetRuntime` — loads agent-supplied routines and exercises them
//!
//! The grader owns resolution, parsing, and report assembly; everything that
//! depends on comparison policy or on a foreign interpreter sits behind one of
//! these traits so hosts can plug in their own.

use serde_json::Value;

use assessor_contracts::{
    error::AssessorResult,
    snippet::{RoundTripBattery, RoundTripRun},
    task::FieldSpec,
};

/// Per-field equivalence check.
///
/// Implementations must be pure: the same `got` and `field` always produce
/// the same answer, and an absent value is a failing value, never a panic.
pub trait Comparator: Send + Sync {
    /// Return true if `got` satisfies `field.rule` against `field.expected`.
    ///
    /// `got` is `None` when the answer does not contain the field.
    fn check(&self, got: Option<&Value>, field: &FieldSpec) -> bool;
}

/// Executes agent-supplied encode/decode routines under test inputs.
///
/// Each call must run in a fresh, disposable namespace with no state shared
/// across calls. Errors raised by the snippets belong in the returned
/// `RoundTripRun`; `Err` is reserved for failures of the runtime itself
/// (interpreter missing, garbled reply).
pub trait SnippetRuntime: Send + Sync {
    fn run_round_trip(&self, battery: &RoundTripBattery) -> AssessorResult<RoundTripRun>;
}
