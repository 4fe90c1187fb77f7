//! The v1 request envelope and its validation rules.
//!
//! These are the value objects that flow into the system: the HTTP boundary
//! deserializes an [`AgentRequest`], validates and normalizes it with
//! [`AgentRequest::validate`], and only then hands it to the runtime. The
//! skill pipeline itself assumes a well-formed request and never fails.

use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of messages accepted in one request.
pub const MAX_MESSAGES: usize = 20;
/// Maximum message content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 3000;
/// Maximum number of allowed-action entries.
pub const MAX_ALLOWED_ACTIONS: usize = 20;

/// The role of a message sender in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

/// A single message in the assistant conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Who sent this message
    pub role: Role,

    /// The text content (trimmed, non-empty after validation)
    pub content: String,
}

impl AgentMessage {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Optional metadata and UI context for response shaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContext {
    /// Which client surface issued the request (e.g. "login", "inbox")
    #[serde(default = "default_surface")]
    pub surface: String,

    /// BCP-47-ish locale tag echoed back in uiHints
    #[serde(default = "default_locale")]
    pub locale: String,

    /// The signed-in user's email, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Free-form string metadata (threadId, subject, ...)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

fn default_surface() -> String {
    "unknown".into()
}
fn default_locale() -> String {
    "en-IN".into()
}

impl Default for AgentContext {
    fn default() -> Self {
        Self {
            surface: default_surface(),
            locale: default_locale(),
            email: None,
            metadata: HashMap::new(),
        }
    }
}

/// Top-level request envelope for skill execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    /// Contract version; only "v1" exists today
    #[serde(default = "default_version")]
    pub version: String,

    /// Which skill should handle this request
    pub skill: String,

    /// Caller-supplied correlation id (may be overridden by header)
    pub request_id: String,

    /// The conversation so far, oldest first
    pub messages: Vec<AgentMessage>,

    /// UI context and metadata
    #[serde(default)]
    pub context: AgentContext,

    /// Action names the caller permits the skill to suggest.
    /// Empty means every candidate is permitted (open policy).
    #[serde(default)]
    pub allowed_actions: Vec<String>,

    /// A client-initiated action, forwarded untouched by the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_action: Option<String>,

    /// Payload for `requested_action`, also forwarded only
    #[serde(default)]
    pub requested_action_payload: HashMap<String, serde_json::Value>,
}

fn default_version() -> String {
    "v1".into()
}

impl AgentRequest {
    /// Validate and normalize the envelope in place.
    ///
    /// Normalization: the skill name is trimmed and lowercased, message
    /// contents are trimmed, and `allowed_actions` is reduced to its
    /// trimmed, blank-free, first-seen-deduplicated form. Normalization is
    /// idempotent — validating an already-valid request changes nothing.
    pub fn validate(&mut self) -> Result<(), RequestError> {
        self.skill = self.skill.trim().to_lowercase();
        if self.skill.is_empty() {
            return Err(RequestError::EmptySkill);
        }
        if self.request_id.trim().is_empty() {
            return Err(RequestError::EmptyRequestId);
        }

        if self.messages.is_empty() || self.messages.len() > MAX_MESSAGES {
            return Err(RequestError::MessageCount {
                max: MAX_MESSAGES,
                got: self.messages.len(),
            });
        }
        for (index, message) in self.messages.iter_mut().enumerate() {
            let trimmed = message.content.trim();
            if trimmed.is_empty() {
                return Err(RequestError::EmptyMessage { index });
            }
            if trimmed.chars().count() > MAX_CONTENT_CHARS {
                return Err(RequestError::MessageTooLong {
                    index,
                    max: MAX_CONTENT_CHARS,
                });
            }
            if trimmed.len() != message.content.len() {
                message.content = trimmed.to_string();
            }
        }

        self.allowed_actions = normalize_actions(&self.allowed_actions);
        if self.allowed_actions.len() > MAX_ALLOWED_ACTIONS {
            return Err(RequestError::TooManyActions {
                max: MAX_ALLOWED_ACTIONS,
                got: self.allowed_actions.len(),
            });
        }

        Ok(())
    }

    /// The message the pipeline reasons over: the content of the most recent
    /// user message, lowercased. If no user message exists, falls back to
    /// the last message regardless of role.
    pub fn last_relevant_message(&self) -> String {
        for message in self.messages.iter().rev() {
            if message.role == Role::User {
                return message.content.to_lowercase();
            }
        }
        self.messages
            .last()
            .map(|m| m.content.to_lowercase())
            .unwrap_or_default()
    }

    /// Allow-list policy check for a candidate action name.
    ///
    /// Open policy: an empty allow-list permits everything. Closed policy:
    /// a non-empty list permits only exact name matches.
    pub fn permits_action(&self, name: &str) -> bool {
        self.allowed_actions.is_empty() || self.allowed_actions.iter().any(|a| a == name)
    }
}

/// Trim entries, drop blanks, and deduplicate keeping first-seen order.
fn normalize_actions(actions: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(actions.len());
    for entry in actions {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|s: &String| s.as_str() == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}
