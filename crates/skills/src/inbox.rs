//! Inbox skill — thread summaries, reply drafts, and navigation hints.
//!
//! Templates and draft payloads interpolate the thread subject from request
//! context metadata when present.

use crate::pipeline::{IntentRule, SkillProfile};
use inboxpilot_core::{AgentContext, SuggestedAction};

/// Inbox skill profile. Rule order is the classification priority.
pub static INBOX: SkillProfile = SkillProfile {
    name: "inbox",
    rules: &[
        IntentRule {
            triggers: &["summary", "summarize", "brief"],
            intent: "summarize_thread",
            confidence: 0.91,
        },
        IntentRule {
            triggers: &["draft", "reply", "respond"],
            intent: "compose_reply_draft",
            confidence: 0.90,
        },
        IntentRule {
            triggers: &["open", "show thread", "view thread"],
            intent: "open_thread",
            confidence: 0.84,
        },
    ],
    default_intent: "inbox_general_help",
    default_confidence: 0.73,
    template,
    action_candidate,
    secret_triggers: &["password", "token"],
    secret_warning: "Avoid sharing credentials in inbox assistant chat.",
};

fn template(intent: &str, context: &AgentContext) -> String {
    let subject = context
        .metadata
        .get("subject")
        .map(String::as_str)
        .unwrap_or("the selected thread");

    match intent {
        "summarize_thread" => format!(
            "I can summarize {subject}. \
             Use the summary action and I will produce a concise overview."
        ),
        "compose_reply_draft" => format!(
            "I can draft a reply for {subject}. \
             Use the draft action and I will prepare a response you can edit."
        ),
        "open_thread" => format!(
            "I can help you open and inspect {subject}. \
             Use the open-thread action to focus this conversation."
        ),
        _ => {
            "I can summarize threads, suggest drafts, and help navigate your inbox actions."
                .to_string()
        }
    }
}

fn action_candidate(intent: &str, context: &AgentContext) -> Option<SuggestedAction> {
    let metadata = &context.metadata;
    let thread_id = metadata.get("threadId").cloned().unwrap_or_default();

    match intent {
        "summarize_thread" => Some(
            SuggestedAction::new("inbox.summarize_thread", "Summarize this thread")
                .with_payload("threadId", thread_id),
        ),
        "compose_reply_draft" => {
            let subject = metadata
                .get("subject")
                .map(String::as_str)
                .unwrap_or("this thread");
            Some(
                SuggestedAction::new("inbox.compose_reply_draft", "Generate draft reply")
                    .with_payload("threadId", thread_id)
                    .with_payload(
                        "draft",
                        format!(
                            "Hi, thanks for your message about {subject}. \
                             Here are the next steps from my side..."
                        ),
                    ),
            )
        }
        "open_thread" => Some(
            SuggestedAction::new("inbox.open_thread", "Open this thread")
                .with_payload("threadId", thread_id),
        ),
        _ => None,
    }
}
