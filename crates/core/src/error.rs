//! Error types for the InboxPilot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all InboxPilot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Skill resolution errors ---
    #[error("{0}")]
    Skill(#[from] SkillError),

    // --- Request envelope errors ---
    #[error("{0}")]
    Request(#[from] RequestError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised while resolving a skill name to an instance.
///
/// These are caller input errors, never transient conditions; the boundary
/// maps them to 400-class responses and nothing retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    /// The requested skill has no entry in the dispatch table.
    ///
    /// Carries the original, pre-normalization name so the caller can see
    /// exactly what was rejected.
    #[error("unsupported skill '{0}'")]
    UnsupportedSkill(String),
}

/// Shape violations in an inbound request envelope.
///
/// Raised by [`crate::AgentRequest::validate`] at the boundary, before the
/// runtime is invoked. The core pipeline assumes a validated request and
/// never fails on one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("skill must not be empty")]
    EmptySkill,

    #[error("requestId must not be empty")]
    EmptyRequestId,

    #[error("messages must contain between 1 and {max} entries, got {got}")]
    MessageCount { max: usize, got: usize },

    #[error("message {index} content must not be empty")]
    EmptyMessage { index: usize },

    #[error("message {index} content exceeds {max} characters")]
    MessageTooLong { index: usize, max: usize },

    #[error("allowedActions must contain at most {max} entries, got {got}")]
    TooManyActions { max: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_skill_keeps_original_name() {
        let err = SkillError::UnsupportedSkill("Unknown-Skill".into());
        assert_eq!(err.to_string(), "unsupported skill 'Unknown-Skill'");
    }

    #[test]
    fn request_error_displays_index() {
        let err = RequestError::MessageTooLong {
            index: 3,
            max: 3000,
        };
        assert!(err.to_string().contains("message 3"));
        assert!(err.to_string().contains("3000"));
    }

    #[test]
    fn skill_error_converts_into_top_level() {
        let err: Error = SkillError::UnsupportedSkill("nope".into()).into();
        assert_eq!(err.to_string(), "unsupported skill 'nope'");
    }
}
