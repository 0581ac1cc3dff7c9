//! Task definitions: where the answer lives, how it is shaped, and how each
//! field is compared against ground truth.
//!
//! Definitions are loaded once (usually from TOML by `assessor-catalog`) and
//! are immutable for the lifetime of a grader.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The full grading specification for one benchmark task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Stable task identifier (e.g. "academic-citation-analysis").
    pub id: String,
    /// Human-readable summary for operator tooling.
    #[serde(default)]
    pub description: String,
    /// Where the final answer is found in agent output.
    #[serde(default)]
    pub locator: AnswerLocator,
    /// Shape the resolved answer text is parsed into.
    pub format: AnswerFormat,
    /// Expected fields, in feedback order.
    pub fields: Vec<FieldSpec>,
    /// Names of task-level checks registered on the grader.
    #[serde(default)]
    pub checks: Vec<String>,
    /// Feedback used when no answer text can be located at all.
    #[serde(default)]
    pub missing_answer_hint: Option<String>,
}

impl TaskDefinition {
    /// The ground-truth mapping, field name to expected value.
    pub fn expected_answer(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.expected.clone()))
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn missing_answer_hint(&self) -> String {
        match (&self.missing_answer_hint, &self.locator.tag) {
            (Some(hint), _) => hint.clone(),
            (None, Some(tag)) => format!("No valid answer found. Expected format: <{tag}>...</{tag}>"),
            (None, None) => "No valid response found in assistant messages.".to_string(),
        }
    }
}

/// Locates the answer within agent output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLocator {
    /// Tag wrapping the answer (e.g. "answer"). When absent the whole
    /// resolved text is the answer.
    #[serde(default)]
    pub tag: Option<String>,
}

/// How resolved answer text is parsed.
///
/// ```toml
/// format = "integer"
/// format = "json"
/// format = "tagged"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerFormat {
    /// The whole answer is one integer, bound to the single declared field.
    Integer,
    /// The answer is a JSON object, possibly fenced or embedded in prose.
    Json,
    /// Each field is pulled from its own tag inside the answer text.
    Tagged,
}

/// Scalar kind of a tagged field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalarKind {
    #[default]
    Text,
    Integer,
}

/// One expected field and its comparison policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key in the parsed answer.
    pub name: String,
    /// Display name for feedback; defaults to `name`.
    #[serde(default)]
    pub label: Option<String>,
    /// Ground-truth value (scalar or list).
    pub expected: Value,
    pub rule: FieldRule,
    /// Tag holding this field, for `tagged` answers.
    #[serde(default)]
    pub tag: Option<String>,
    /// Scalar conversion for `tagged` answers.
    #[serde(default)]
    pub parse: ScalarKind,
}

impl FieldSpec {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Per-field equivalence rule.
///
/// Written as an inline table in TOML:
/// ```toml
/// rule = { kind = "numeric", tolerance = 2 }
/// rule = { kind = "alias", aliases = ["zhining zhang"] }
/// rule = { kind = "custom", function = "creative-commons-attribution" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldRule {
    /// String-coerced, case-sensitive equality.
    Exact,
    /// Equality after lowercasing and collapsing whitespace.
    Normalized,
    /// Substring match in either direction, or a declared alias.
    Alias {
        /// Each alias matches when all of its words occur in the answer.
        #[serde(default)]
        aliases: Vec<String>,
    },
    /// Package identifier equality (version suffix stripped, lowercased).
    Identifier,
    /// Numeric value within an absolute tolerance of the expected value.
    Numeric { tolerance: f64 },
    /// Order-independent equality of normalized identifier lists.
    NormalizedSet,
    /// Delegate to a comparison function registered under `function`.
    Custom { function: String },
}

impl FieldRule {
    /// Tolerance to mention in feedback, for rules that have one.
    pub fn tolerance(&self) -> Option<f64> {
        match self {
            FieldRule::Numeric { tolerance } => Some(*tolerance),
            _ => None,
        }
    }

    /// Short name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldRule::Exact => "exact",
            FieldRule::Normalized => "normalized",
            FieldRule::Alias { .. } => "alias",
            FieldRule::Identifier => "identifier",
            FieldRule::Numeric { .. } => "numeric",
            FieldRule::NormalizedSet => "normalized-set",
            FieldRule::Custom { .. } => "custom",
        }
    }
}
