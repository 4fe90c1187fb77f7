//! The v1 response envelope.
//!
//! Built once by the skill pipeline at assembly and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A UI action hint the client may render alongside the assistant text.
///
/// Identity is `name`; the allow-list policy filters on exact name matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    /// Stable action identifier, e.g. "auth.forgot_password"
    pub name: String,

    /// Human-readable button label
    pub label: String,

    /// Prefill values for the action, built from request context
    #[serde(default)]
    pub payload: HashMap<String, String>,
}

impl SuggestedAction {
    /// Create an action with no payload.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            payload: HashMap::new(),
        }
    }

    /// Attach a payload entry.
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}

/// A detected, non-blocking risk annotation attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFlag {
    /// Machine-readable flag code, e.g. "possible_secret_exposure"
    pub code: String,

    /// Severity level; currently only "warn" is emitted
    pub severity: String,

    /// Skill-specific guidance for the user
    pub message: String,
}

/// Surface/locale metadata echoed back so the client can render the
/// response appropriately. Copied verbatim from the request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiHints {
    pub surface: String,
    pub locale: String,
}

/// Top-level response envelope produced by a skill pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    /// Contract version, always "v1"
    pub version: String,

    /// Canonical name of the skill that handled the request
    pub skill: String,

    /// The drafted assistant-facing text
    pub assistant_text: String,

    /// Classification tag assigned by the pipeline
    pub intent: String,

    /// Fixed per-rule confidence, 0.0..=1.0
    pub confidence: f32,

    /// Allow-list-filtered action hints, in suggestion order
    pub suggested_actions: Vec<SuggestedAction>,

    /// Echoed rendering hints
    pub ui_hints: UiHints,

    /// Non-blocking risk annotations
    pub safety_flags: Vec<SafetyFlag>,
}
