//! Transcript resolution: finding the single authoritative answer text.
//!
//! Resolution order, first success wins:
//!
//! 1. A non-empty `task_result` on the record.
//! 2. The most recent assistant `task_complete` call carrying a non-empty
//!    string `result` argument.
//! 3. The most recent assistant message with non-empty content (containing
//!    the answer tag, when the task declares one).
//!
//! Explicit result channels (1 and 2) are narrowed to the answer tag when the
//! tag is present and fall back to the whole text otherwise. Free-form
//! content (3) must carry the tag when one is configured.

use serde_json::{Map, Value};
use tracing::debug;

use assessor_contracts::{
    record::ResultRecord,
    task::AnswerLocator,
    transcript::{Arguments, Message, Transcript, RESULT_ARGUMENT},
};

use crate::tags::TagPattern;

/// Where the resolved answer text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    TaskResult,
    CompletionCall,
    AssistantContent,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::TaskResult => "task_result",
            AnswerSource::CompletionCall => "completion_call",
            AnswerSource::AssistantContent => "assistant_content",
        }
    }
}

/// Answer text plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub source: AnswerSource,
}

/// Resolves the final answer text of a result record.
#[derive(Debug, Clone)]
pub struct TranscriptResolver {
    tag: Option<TagPattern>,
}

impl TranscriptResolver {
    /// Build a resolver for the given locator.
    pub fn new(locator: &AnswerLocator) -> Result<Self, regex::Error> {
        let tag = locator.tag.as_deref().map(TagPattern::new).transpose()?;
        Ok(Self { tag })
    }

    /// Determine the answer text, or `None` if no source yields one.
    pub fn resolve(&self, record: &ResultRecord) -> Option<Resolution> {
        if let Some(task_result) = record.task_result.as_deref() {
            if let Some(text) = self.narrow_explicit(task_result) {
                debug!(source = "task_result", "answer resolved");
                return Some(Resolution {
                    text,
                    source: AnswerSource::TaskResult,
                });
            }
        }

        if let Some(text) = self.from_completion_call(&record.transcript) {
            return Some(Resolution {
                text,
                source: AnswerSource::CompletionCall,
            });
        }

        if let Some(text) = self.from_assistant_content(&record.transcript) {
            return Some(Resolution {
                text,
                source: AnswerSource::AssistantContent,
            });
        }

        debug!(
            messages = record.transcript.messages().len(),
            "no answer candidate in record"
        );
        None
    }

    fn from_completion_call(&self, transcript: &Transcript) -> Option<String> {
        for (turns_back, message) in transcript.messages().iter().rev().enumerate() {
            if !message.is_assistant() {
                continue;
            }
            for call in message.tool_calls.iter().filter(|c| c.is_completion()) {
                let Some(arguments) = decode_arguments(&call.function.arguments) else {
                    continue;
                };
                let Some(result) = arguments.get(RESULT_ARGUMENT).and_then(Value::as_str) else {
                    continue;
                };
                if let Some(text) = self.narrow_explicit(result) {
                    debug!(source = "completion_call", turns_back, "answer resolved");
                    return Some(text);
                }
            }
        }
        None
    }

    fn from_assistant_content(&self, transcript: &Transcript) -> Option<String> {
        transcript
            .messages()
            .iter()
            .rev()
            .filter(|m| m.is_assistant())
            .find_map(|m| self.narrow_content(m))
    }

    fn narrow_explicit(&self, text: &str) -> Option<String> {
        let tagged = self
            .tag
            .as_ref()
            .and_then(|tag| tag.first(text))
            .filter(|inner| !inner.is_empty());
        let candidate = tagged.unwrap_or_else(|| text.trim().to_string());
        (!candidate.is_empty()).then_some(candidate)
    }

    fn narrow_content(&self, message: &Message) -> Option<String> {
        let content = message.text()?;
        let candidate = match &self.tag {
            Some(tag) => tag.first(content)?,
            None => content.trim().to_string(),
        };
        (!candidate.is_empty()).then_some(candidate)
    }
}

/// Decode a tool-call argument payload into a mapping.
///
/// Structured payloads are used as-is; string payloads are JSON-decoded.
/// Anything that does not yield an object is `None`.
pub fn decode_arguments(arguments: &Arguments) -> Option<Map<String, Value>> {
    match arguments {
        Arguments::Structured(map) => Some(map.clone()),
        Arguments::Encoded(raw) => match serde_json::from_str::<Map<String, Value>>(raw) {
            Ok(map) => Some(map),
            Err(e) => {
                debug!(error = %e, "undecodable tool-call arguments skipped");
                None
            }
        },
    }
}
