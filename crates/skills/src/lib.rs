//! Skill implementations for InboxPilot.
//!
//! Every skill is the same machine run over different data: a linear
//! classify → draft → suggest pipeline whose per-domain behavior lives
//! entirely in a [`SkillProfile`] (keyword rule table, response templates,
//! action candidates, secret-exposure triggers). Adding a skill means
//! writing a profile and a dispatch-table entry, not new control flow.

pub mod auth;
pub mod inbox;
pub mod pipeline;

pub use pipeline::{IntentRule, PipelineState, SkillPipeline, SkillProfile};
