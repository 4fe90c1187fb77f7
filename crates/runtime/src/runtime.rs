//! The runtime dispatcher — resolve a skill, run its pipeline.

use crate::registry::SkillRegistry;
use inboxpilot_core::{AgentRequest, AgentResponse, Skill, SkillError};
use tracing::debug;

/// The single entry point for skill execution.
///
/// Holds no state beyond the registry reference and performs no validation
/// itself — the boundary validates the envelope before calling in.
pub struct AgentRuntime {
    registry: SkillRegistry,
}

impl Default for AgentRuntime {
    fn default() -> Self {
        Self::new(SkillRegistry::default())
    }
}

impl AgentRuntime {
    /// Create a runtime over the given registry.
    pub fn new(registry: SkillRegistry) -> Self {
        Self { registry }
    }

    /// Respond to a skill-scoped request.
    ///
    /// Propagates the registry's lookup failure unchanged; a resolved skill
    /// always produces a complete response.
    pub fn respond(&self, request: &AgentRequest) -> Result<AgentResponse, SkillError> {
        let skill = self.registry.get(&request.skill)?;
        debug!(
            skill = skill.name(),
            request_id = %request.request_id,
            "Dispatching request"
        );
        Ok(skill.run(request))
    }

    /// The registered skill names, for the health/status boundary.
    pub fn registered_skills(&self) -> Vec<&'static str> {
        self.registry.registered_skills()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxpilot_core::AgentMessage;
    use std::collections::HashMap;

    fn request(skill: &str, content: &str) -> AgentRequest {
        AgentRequest {
            version: "v1".into(),
            skill: skill.into(),
            request_id: "rt-test-1".into(),
            messages: vec![AgentMessage::user(content)],
            context: Default::default(),
            allowed_actions: vec![],
            requested_action: None,
            requested_action_payload: HashMap::new(),
        }
    }

    #[test]
    fn routes_to_auth_skill() {
        let runtime = AgentRuntime::default();
        let response = runtime.respond(&request("auth", "I forgot my password")).unwrap();
        assert_eq!(response.skill, "auth");
        assert_eq!(response.intent, "forgot_password");
        assert_eq!(response.version, "v1");
    }

    #[test]
    fn routes_to_inbox_skill() {
        let runtime = AgentRuntime::default();
        let response = runtime
            .respond(&request("inbox", "summarize this thread"))
            .unwrap();
        assert_eq!(response.skill, "inbox");
        assert_eq!(response.intent, "summarize_thread");
    }

    #[test]
    fn propagates_unsupported_skill_error() {
        let runtime = AgentRuntime::default();
        let err = runtime.respond(&request("unknown-skill", "hello")).unwrap_err();
        assert_eq!(err, SkillError::UnsupportedSkill("unknown-skill".into()));
    }

    #[test]
    fn lists_registered_skills() {
        let runtime = AgentRuntime::default();
        assert!(runtime.registered_skills().contains(&"inbox"));
    }
}
