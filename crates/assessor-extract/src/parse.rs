//! Answer parsing: resolved text into typed values.
//!
//! Structured answers are decoded through an ordered chain of attempts, each
//! returning an optional object:
//!
//! 1. Direct JSON decode of the whole text.
//! 2. The first fenced code block (```` ``` ````, optional language tag).
//! 3. The first brace-delimited substring without nested braces.
//!
//! The first attempt that yields a JSON object wins. Failures never escape
//! their own attempt.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Longest slice of the offending text carried in a `ParseError`.
const PREVIEW_CHARS: usize = 200;

/// Why an answer could not be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not parse '{text}' as an integer")]
    NotAnInteger { text: String },

    #[error("could not parse answer as JSON: {preview}")]
    Unparsable { preview: String },
}

/// Which attempt in the fallback chain produced the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Direct,
    CodeFence,
    BraceScan,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::Direct => "direct",
            ParseStrategy::CodeFence => "code_fence",
            ParseStrategy::BraceScan => "brace_scan",
        }
    }
}

/// A decoded JSON object and the strategy that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedObject {
    pub fields: Map<String, Value>,
    pub strategy: ParseStrategy,
}

/// Parse the trimmed text as a signed integer.
pub fn parse_integer(text: &str) -> Result<i64, ParseError> {
    text.trim().parse::<i64>().map_err(|_| ParseError::NotAnInteger {
        text: text.trim().to_string(),
    })
}

/// Decode a JSON object from loosely-structured text.
pub fn parse_object(text: &str) -> Result<ParsedObject, ParseError> {
    let attempts: [(ParseStrategy, fn(&str) -> Option<Map<String, Value>>); 3] = [
        (ParseStrategy::Direct, decode_direct),
        (ParseStrategy::CodeFence, decode_code_fence),
        (ParseStrategy::BraceScan, decode_brace_scan),
    ];

    for (strategy, attempt) in attempts {
        if let Some(fields) = attempt(text) {
            debug!(strategy = strategy.as_str(), fields = fields.len(), "answer decoded");
            return Ok(ParsedObject { fields, strategy });
        }
    }

    Err(ParseError::Unparsable {
        preview: preview(text, PREVIEW_CHARS),
    })
}

/// The first `limit` characters of `text`.
pub fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn decode_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn decode_direct(text: &str) -> Option<Map<String, Value>> {
    decode_object(text.trim())
}

static FENCE_PATTERN: OnceLock<Regex> = OnceLock::new();
static BRACE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// First fenced block, with an optional language label.
fn fence_pattern() -> &'static Regex {
    FENCE_PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```(?:[A-Za-z0-9_+-]+)?\s*(.*?)\s*```").expect("valid fence pattern")
    })
}

/// Innermost `{...}` span without nested braces.
fn brace_pattern() -> &'static Regex {
    BRACE_PATTERN.get_or_init(|| Regex::new(r"(?s)\{[^{}]*\}").expect("valid brace pattern"))
}

fn decode_code_fence(text: &str) -> Option<Map<String, Value>> {
    let block = fence_pattern().captures(text)?.get(1)?.as_str();
    decode_object(block)
}

fn decode_brace_scan(text: &str) -> Option<Map<String, Value>> {
    decode_object(brace_pattern().find(text)?.as_str())
}
