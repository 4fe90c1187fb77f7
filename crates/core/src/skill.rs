//! Skill trait — a named handler for one assistant domain.
//!
//! Every skill runs the same classify → draft → suggest pipeline over its
//! own data tables; the runtime dispatches to skills purely through this
//! trait. The trait bound also discharges the "resolved skill must expose a
//! run operation" invariant statically — an object without `run` cannot be
//! registered in the first place.

use crate::request::AgentRequest;
use crate::response::AgentResponse;

/// A named handler implementing the classify/draft/suggest pipeline for one
/// domain (e.g. auth, inbox).
///
/// Skills are stateless with respect to request data once constructed (their
/// only state is the injected [`crate::Generator`]) and are safe for
/// unsynchronized concurrent reuse.
pub trait Skill: Send + Sync {
    /// Canonical skill name stamped into every response.
    fn name(&self) -> &'static str;

    /// Execute the pipeline for one validated request.
    ///
    /// Total: every lookup inside the pipeline has a default, so a
    /// well-formed request always produces a complete response.
    fn run(&self, request: &AgentRequest) -> AgentResponse;
}
