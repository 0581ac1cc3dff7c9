//! Rule-based field comparator for the assessor harness.
//!
//! `FieldVerifier` implements the `Comparator` trait from `assessor-core`.
//! Each `FieldRule` variant maps to one comparison function below; all of
//! them treat an absent value as a failing value.
//!
//! Custom rules delegate to named functions registered via `register_rule`.
//! Task-specific leniency (spelling variants of a license, say) is supplied
//! by the task adapter, not baked into the verifier.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use assessor_contracts::task::{FieldRule, FieldSpec};
use assessor_core::traits::Comparator;

use crate::normalize::{normalize_identifier, normalize_text, stringify};

/// A caller-supplied comparison function.
///
/// Receives the extracted value (`None` when absent) and the expected value.
/// Returns true when the field should pass.
pub type CustomRuleFn = Box<dyn Fn(Option<&Value>, &Value) -> bool + Send + Sync>;

/// The assessor field comparator.
pub struct FieldVerifier {
    /// Named comparison functions provided by task adapters.
    custom_rules: HashMap<String, CustomRuleFn>,
}

impl FieldVerifier {
    /// Create a verifier with no custom rules registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Register a custom comparison function under `name`.
    ///
    /// The name must match the `function` of a `FieldRule::Custom` rule.
    /// Registering the same name twice replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomRuleFn) {
        self.custom_rules.insert(name.into(), f);
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.custom_rules.contains_key(name)
    }
}

impl Default for FieldVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Comparator for FieldVerifier {
    fn check(&self, got: Option<&Value>, field: &FieldSpec) -> bool {
        let expected = &field.expected;

        let passed = match &field.rule {
            FieldRule::Exact => got.is_some_and(|g| stringify(g) == stringify(expected)),

            FieldRule::Normalized => got.is_some_and(|g| {
                normalize_text(&stringify(g)) == normalize_text(&stringify(expected))
            }),

            FieldRule::Alias { aliases } => {
                got.is_some_and(|g| alias_matches(&stringify(g), &stringify(expected), aliases))
            }

            FieldRule::Identifier => got.is_some_and(|g| {
                normalize_identifier(&stringify(g)) == normalize_identifier(&stringify(expected))
            }),

            FieldRule::Numeric { tolerance } => within_tolerance(got, expected, *tolerance),

            FieldRule::NormalizedSet => set_matches(got, expected),

            // An unregistered name fails the field so misconfigured tasks
            // surface immediately.
            FieldRule::Custom { function } => match self.custom_rules.get(function.as_str()) {
                Some(f) => f(got, expected),
                None => {
                    warn!(
                        field = %field.name,
                        function = %function,
                        "no custom rule registered for function name"
                    );
                    false
                }
            },
        };

        debug!(
            field = %field.name,
            rule = field.rule.kind(),
            present = got.is_some(),
            passed,
            "field rule evaluated"
        );
        passed
    }
}

// ── Rule implementations ──────────────────────────────────────────────────────

/// Name matching with tolerance for partial and reordered answers.
///
/// Passes when either normalized value is a substring of the other. Beyond
/// that, an answer whose words are all words of the expected name passes
/// (reordered names), as does one containing every word of a declared alias.
fn alias_matches(got: &str, expected: &str, aliases: &[String]) -> bool {
    let got = normalize_text(got);
    if got.is_empty() {
        return false;
    }
    let expected = normalize_text(expected);
    if got.contains(&expected) || expected.contains(&got) {
        return true;
    }

    let expected_words: HashSet<&str> = expected.split(' ').collect();
    if got.split(' ').all(|word| expected_words.contains(word)) {
        return true;
    }

    aliases.iter().any(|alias| {
        let alias = normalize_text(alias);
        !alias.is_empty() && alias.split(' ').all(|word| got.contains(word))
    })
}

/// `|got - expected| <= tolerance` on exact values. Non-numbers fail,
/// booleans included.
fn within_tolerance(got: Option<&Value>, expected: &Value, tolerance: f64) -> bool {
    match (got.and_then(Value::as_f64), expected.as_f64()) {
        (Some(got), Some(expected)) => (got - expected).abs() <= tolerance,
        _ => false,
    }
}

/// Order-independent equality of normalized identifier lists.
fn set_matches(got: Option<&Value>, expected: &Value) -> bool {
    let (Some(Value::Array(got)), Value::Array(expected)) = (got, expected) else {
        return false;
    };
    identifier_set(got) == identifier_set(expected)
}

/// Non-string elements are ignored.
fn identifier_set(items: &[Value]) -> BTreeSet<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(normalize_identifier)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
