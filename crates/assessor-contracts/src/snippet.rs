//! Wire types for encode/decode snippet verification.
//!
//! A `RoundTripBattery` is what the grader hands to a snippet runtime; a
//! `RoundTripRun` is what comes back. The runtime owns the language
//! semantics (equality, symbol counting); the grader only reads the outcome.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to load snippets and exercise an encode/decode pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTripBattery {
    /// Source snippets, loaded in order into one fresh namespace.
    pub snippets: Vec<String>,
    /// Name of the encoding routine the snippets must define.
    pub encode: String,
    /// Name of the decoding routine the snippets must define.
    pub decode: String,
    /// Inputs; each is passed to `encode`, and the encoding to `decode`.
    pub cases: Vec<Value>,
}

/// Reply from a snippet runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundTripRun {
    /// Set when loading the snippets raised; no cases run in that case.
    #[serde(default)]
    pub load_error: Option<String>,
    /// Which of the requested routines the snippets defined.
    #[serde(default)]
    pub defined: Vec<String>,
    /// One outcome per case, in request order. Empty unless both routines
    /// were defined.
    #[serde(default)]
    pub cases: Vec<CaseOutcome>,
}

impl RoundTripRun {
    pub fn defines(&self, name: &str) -> bool {
        self.defined.iter().any(|d| d == name)
    }
}

/// Outcome of one encode/decode case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Leading characters of the encoding, for feedback.
    #[serde(default)]
    pub encoded_preview: Option<String>,
    /// Number of distinct symbols in the encoding.
    #[serde(default)]
    pub distinct_symbols: Option<u64>,
    /// Representation of the decoded value, for feedback.
    #[serde(default)]
    pub decoded_preview: Option<String>,
    /// Whether the decoded value equals the input.
    #[serde(default)]
    pub matches: bool,
    /// Message of the error raised while running this case.
    #[serde(default)]
    pub error: Option<String>,
}
