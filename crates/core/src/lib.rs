//! # InboxPilot Core
//!
//! Domain types, traits, and error definitions for the InboxPilot assistant
//! platform. This crate has **zero framework dependencies** — it defines the
//! v1 request/response contract and the seams that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every pluggable subsystem is defined as a trait here. Implementations
//! live in their respective crates. This enables:
//! - Swapping the text-generation backend without touching pipeline logic
//! - Easy testing with deterministic stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod generate;
pub mod request;
pub mod response;
pub mod skill;

// Re-export key types at crate root for ergonomics
pub use error::{Error, RequestError, Result, SkillError};
pub use generate::{Generator, RuleBasedGenerator};
pub use request::{AgentContext, AgentMessage, AgentRequest, Role};
pub use response::{AgentResponse, SafetyFlag, SuggestedAction, UiHints};
pub use skill::Skill;
