//! The shared three-stage skill pipeline.
//!
//! A pipeline run is a fixed linear sequence with no branches, loops, or
//! re-entry:
//!
//! ```text
//! Start → ClassifyIntent → DraftResponse → SuggestActions → Done
//! ```
//!
//! Each stage is a pure transform over [`PipelineState`]; the state at
//! `Done` maps 1:1 into the response envelope. The stage order is encoded
//! directly in [`SkillPipeline::run`] — there is nothing dynamic to
//! construct, so no graph machinery is needed.

use inboxpilot_core::{
    AgentContext, AgentRequest, AgentResponse, Generator, SafetyFlag, Skill, SuggestedAction,
    UiHints,
};
use std::sync::Arc;
use tracing::debug;

/// One entry in a skill's ordered intent classification table.
///
/// The first rule whose trigger set has any substring present in the
/// message wins; later rules are not consulted. Confidence is a fixed
/// per-rule constant, never computed from match strength.
pub struct IntentRule {
    /// Substrings that activate this rule
    pub triggers: &'static [&'static str],
    /// Intent tag assigned on match
    pub intent: &'static str,
    /// Fixed confidence reported for this intent
    pub confidence: f32,
}

/// The per-skill data behind the shared pipeline shape.
///
/// Profiles are `'static` tables: rule order is the implicit priority for
/// overlapping triggers and is fixed at compile time.
pub struct SkillProfile {
    /// Canonical skill name stamped into responses
    pub name: &'static str,

    /// Ordered classification rules, highest priority first
    pub rules: &'static [IntentRule],

    /// Intent assigned when no rule matches
    pub default_intent: &'static str,

    /// Confidence paired with the default intent
    pub default_confidence: f32,

    /// Resolve the response template for an intent.
    /// Must be total: unrecognized intents fall back to the default
    /// intent's template.
    pub template: fn(intent: &str, context: &AgentContext) -> String,

    /// Zero-or-one candidate action for an intent, with payload built
    /// from context fields.
    pub action_candidate: fn(intent: &str, context: &AgentContext) -> Option<SuggestedAction>,

    /// Substrings in the user message that indicate credential leakage
    pub secret_triggers: &'static [&'static str],

    /// Skill-specific warning text for the secret-exposure flag
    pub secret_warning: &'static str,
}

/// Transient execution state for one pipeline run.
///
/// Created fresh per invocation, owned exclusively by that run, and
/// discarded after assembly — nothing here survives across requests.
pub struct PipelineState<'a> {
    /// The validated inbound request
    pub request: &'a AgentRequest,
    /// Classified intent tag
    pub intent: &'static str,
    /// Fixed confidence for the classified intent
    pub confidence: f32,
    /// Drafted assistant-facing text
    pub assistant_text: String,
    /// Allow-list-filtered action hints
    pub suggested_actions: Vec<SuggestedAction>,
    /// Detected risk annotations
    pub safety_flags: Vec<SafetyFlag>,
}

/// A skill: the shared pipeline paired with one profile and an injected
/// generation backend.
pub struct SkillPipeline {
    profile: &'static SkillProfile,
    generator: Arc<dyn Generator>,
}

impl SkillPipeline {
    /// Create a pipeline for the given profile and generation backend.
    pub fn new(profile: &'static SkillProfile, generator: Arc<dyn Generator>) -> Self {
        Self { profile, generator }
    }

    /// Stage 1 — evaluate the ordered rule table against the last relevant
    /// message. First match wins; no match falls through to the skill
    /// default.
    fn classify_intent<'a>(&self, mut state: PipelineState<'a>) -> PipelineState<'a> {
        let message = state.request.last_relevant_message();
        for rule in self.profile.rules {
            if rule.triggers.iter().any(|t| message.contains(t)) {
                state.intent = rule.intent;
                state.confidence = rule.confidence;
                return state;
            }
        }
        state.intent = self.profile.default_intent;
        state.confidence = self.profile.default_confidence;
        state
    }

    /// Stage 2 — resolve the intent's template and pass it through the
    /// generation backend.
    fn draft_response<'a>(&self, mut state: PipelineState<'a>) -> PipelineState<'a> {
        let prompt = (self.profile.template)(state.intent, &state.request.context);
        state.assistant_text = self.generator.generate(&prompt);
        state
    }

    /// Stage 3 — append the intent's candidate action if the allow-list
    /// permits it, and scan the message for secret-exposure triggers.
    ///
    /// At most one safety flag is emitted per run, no matter how many
    /// trigger substrings occur in the message.
    fn suggest_actions<'a>(&self, mut state: PipelineState<'a>) -> PipelineState<'a> {
        if let Some(action) = (self.profile.action_candidate)(state.intent, &state.request.context)
        {
            if state.request.permits_action(&action.name) {
                state.suggested_actions.push(action);
            } else {
                debug!(
                    skill = self.profile.name,
                    action = %action.name,
                    "Candidate action filtered by allow-list"
                );
            }
        }

        let message = state.request.last_relevant_message();
        if self
            .profile
            .secret_triggers
            .iter()
            .any(|t| message.contains(t))
        {
            state.safety_flags.push(SafetyFlag {
                code: "possible_secret_exposure".into(),
                severity: "warn".into(),
                message: self.profile.secret_warning.into(),
            });
        }
        state
    }

    /// Map the final state 1:1 into the response envelope.
    fn assemble(&self, state: PipelineState<'_>) -> AgentResponse {
        AgentResponse {
            version: "v1".into(),
            skill: self.profile.name.into(),
            assistant_text: state.assistant_text,
            intent: state.intent.into(),
            confidence: state.confidence,
            suggested_actions: state.suggested_actions,
            ui_hints: UiHints {
                surface: state.request.context.surface.clone(),
                locale: state.request.context.locale.clone(),
            },
            safety_flags: state.safety_flags,
        }
    }
}

impl Skill for SkillPipeline {
    fn name(&self) -> &'static str {
        self.profile.name
    }

    fn run(&self, request: &AgentRequest) -> AgentResponse {
        let state = PipelineState {
            request,
            intent: self.profile.default_intent,
            confidence: self.profile.default_confidence,
            assistant_text: String::new(),
            suggested_actions: Vec::new(),
            safety_flags: Vec::new(),
        };
        let state = self.classify_intent(state);
        let state = self.draft_response(state);
        let state = self.suggest_actions(state);

        debug!(
            skill = self.profile.name,
            intent = state.intent,
            confidence = state.confidence,
            actions = state.suggested_actions.len(),
            "Pipeline run complete"
        );
        self.assemble(state)
    }
}
