//! Skill routing for InboxPilot.
//!
//! Two pieces live here:
//!
//! - [`SkillRegistry`] — resolves a normalized skill name to a
//!   lazily-constructed, memoized skill instance via a closed dispatch
//!   table.
//! - [`AgentRuntime`] — the single entry point: resolve the skill, run its
//!   pipeline, return the response or propagate the lookup failure.

pub mod registry;
pub mod runtime;

pub use registry::SkillRegistry;
pub use runtime::AgentRuntime;
