//! Types for the chat-completions API.
//!
//! These match the OpenAI chat-completions wire format; only the fields the
//! server actually uses are modeled.

use serde::{Deserialize, Serialize};

/// A message in a chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender ("system" or "user").
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

/// Requested response format.
///
/// `json_object` asks the service to prefer returning a JSON-shaped payload
/// where the model supports it.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Format name ("json_object" or "text").
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// The `json_object` response format.
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_owned(),
        }
    }
}

/// Request body for the chat-completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Requested response format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Response from the chat-completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first one carries the answer.
    pub choices: Vec<Choice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant message for this choice.
    pub message: AssistantMessage,
}

/// The assistant message within a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Raw text content of the completion; may be absent or empty.
    pub content: Option<String>,
}
