//! Conversation transcript types.
//!
//! A transcript arrives as loosely-typed JSON from the upstream agent
//! framework. `Transcript::from_values` lifts it into typed messages once, at
//! the boundary; entries that do not look like messages (and tool calls that
//! do not look like tool calls) are skipped and counted rather than failing
//! the whole record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Function name the agent framework uses to signal task completion.
pub const COMPLETION_FUNCTION: &str = "task_complete";

/// Argument of the completion call that carries the final textual result.
pub const RESULT_ARGUMENT: &str = "result";

/// The author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    /// Any role string outside the known set, or a missing role.
    Other,
}

impl Role {
    /// Map a wire role name onto the closed set. Matching is exact.
    pub fn from_name(name: &str) -> Self {
        match name {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            _ => Role::Other,
        }
    }
}

/// Argument payload of a function call.
///
/// Frameworks disagree on whether arguments are sent as a JSON object or as
/// a JSON-encoded string; both shapes are accepted here and decoded later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arguments {
    Structured(Map<String, Value>),
    Encoded(String),
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments::Structured(Map::new())
    }
}

/// The function half of a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Arguments,
}

/// A structured function invocation embedded in an assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<String>,
    pub function: FunctionCall,
}

impl ToolCall {
    /// True if this call is the reserved completion signal.
    pub fn is_completion(&self) -> bool {
        self.function.name == COMPLETION_FUNCTION
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    /// Free-text content. Non-string content (e.g. multi-part arrays) is
    /// treated as absent.
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    /// Content text, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// An ordered, read-only message history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
    entry_count: usize,
    skipped: usize,
}

impl Transcript {
    /// Lift raw conversation entries into typed messages.
    ///
    /// Non-object entries and undecodable tool calls are dropped; the number
    /// dropped is available through `skipped_entries`.
    pub fn from_values(entries: &[Value]) -> Self {
        let mut messages = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for entry in entries {
            let Some(object) = entry.as_object() else {
                skipped += 1;
                continue;
            };

            let role = object
                .get("role")
                .and_then(Value::as_str)
                .map(Role::from_name)
                .unwrap_or(Role::Other);
            let content = object
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_owned);

            let mut tool_calls = Vec::new();
            let raw_calls = object.get("tool_calls").and_then(Value::as_array);
            for raw in raw_calls.into_iter().flatten() {
                match serde_json::from_value::<ToolCall>(raw.clone()) {
                    Ok(call) => tool_calls.push(call),
                    Err(_) => skipped += 1,
                }
            }

            messages.push(Message {
                role,
                content,
                tool_calls,
            });
        }

        Self {
            messages,
            entry_count: entries.len(),
            skipped,
        }
    }

    /// Build a transcript from already-typed messages.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let entry_count = messages.len();
        Self {
            messages,
            entry_count,
            skipped: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of raw entries the transcript was built from, including any
    /// that were skipped.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Number of entries and tool calls dropped as malformed.
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
